use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// The location of the node being converted, rendered as `$.a[0].b`.
///
/// Keys that are not plain identifiers are bracket-quoted, so key `"a.b"`
/// renders as `$["a.b"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    #[inline]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(Segment::Key(key.into()));
    }

    #[inline]
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    #[inline]
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Number of segments below the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn render(&self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) if is_plain(key) => write!(f, ".{key}")?,
                Segment::Key(key) => {
                    f.write_str("[\"")?;
                    for c in key.chars() {
                        match c {
                            '"' | '\\' => write!(f, "\\{c}")?,
                            c => write!(f, "{c}")?,
                        }
                    }
                    f.write_str("\"]")?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn is_plain(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::JsonPath;

    #[test]
    fn render() {
        let mut path = JsonPath::new();
        assert_eq!(path.render(), "$");
        path.push_key("a");
        path.push_index(0);
        path.push_key("b");
        assert_eq!(path.render(), "$.a[0].b");
        path.pop();
        path.pop();
        assert_eq!(path.render(), "$.a");
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn ambiguous_keys_are_quoted() {
        let mut path = JsonPath::new();
        path.push_key("a.b");
        path.push_index(0);
        assert_eq!(path.render(), r#"$["a.b"][0]"#);

        path.push_key("userName");
        assert_eq!(path.render(), r#"$["a.b"][0].userName"#);

        let mut path = JsonPath::new();
        path.push_key("");
        path.push_key("x[1]");
        path.push_key(r#"say "hi""#);
        assert_eq!(path.render(), r#"$[""]["x[1]"]["say \"hi\""]"#);
    }
}
