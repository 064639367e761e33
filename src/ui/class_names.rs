/// Ordered list of style classes with an optional namespace prefix.
///
/// With a prefix of `fs-`, `add("error")` records `fs-error`. Raw class
/// strings passed through [`ClassList::extend_raw`] are kept as written, so
/// unprefixed names from callers do not match the theme when a prefix is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassList {
    prefix: Option<String>,
    classes: Vec<String>,
}

impl ClassList {
    pub fn new(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            classes: Vec::new(),
        }
    }

    pub fn add(mut self, class: &str) -> Self {
        let name = match &self.prefix {
            Some(prefix) => format!("{prefix}{class}"),
            None => class.to_string(),
        };
        if !self.classes.contains(&name) {
            self.classes.push(name);
        }
        self
    }

    pub fn add_if(self, condition: bool, class: &str) -> Self {
        if condition { self.add(class) } else { self }
    }

    pub fn extend_raw(mut self, raw: Option<&str>) -> Self {
        for class in raw.unwrap_or_default().split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Class names with the prefix removed; names lacking the prefix are skipped.
    pub fn unprefixed(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().filter_map(|class| match &self.prefix {
            Some(prefix) => class.strip_prefix(prefix.as_str()),
            None => Some(class.as_str()),
        })
    }

    pub fn contains(&self, class: &str) -> bool {
        self.unprefixed().any(|c| c == class)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.classes.join(" ").as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ClassList;

    #[test]
    fn conditional_classes_and_dedup() {
        let list = ClassList::new(None)
            .add("input")
            .add_if(false, "input-password")
            .add_if(true, "input-focused")
            .add("input");
        assert_eq!(list.to_string(), "input input-focused");
    }

    #[test]
    fn prefix_applies_to_added_classes_only() {
        let list = ClassList::new(Some("fs-"))
            .add("hint")
            .extend_raw(Some("error fs-spaced"));
        assert_eq!(list.to_string(), "fs-hint error fs-spaced");
        assert_eq!(list.unprefixed().collect::<Vec<_>>(), vec!["hint", "spaced"]);
        assert!(list.contains("hint"));
        assert!(!list.contains("error"));
    }

    #[test]
    fn empty_prefix_behaves_like_none() {
        let list = ClassList::new(Some("")).add("label");
        assert_eq!(list.prefix(), None);
        assert_eq!(list.to_string(), "label");
    }
}
