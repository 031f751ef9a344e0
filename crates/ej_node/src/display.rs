//! JSON text rendering: `{}` is compact, `{:#}` is indented by two spaces.

use core::fmt::{self, Write};

use crate::{JsonArray, JsonNode, JsonObject, JsonPrimitive};

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        write_node(f, self, pretty, 0)
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        write_array(f, self, pretty, 0)
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        write_object(f, self, pretty, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &JsonNode, pretty: bool, depth: usize) -> fmt::Result {
    match node {
        JsonNode::Null => f.write_str("null"),
        JsonNode::Primitive(JsonPrimitive::Bool(v)) => f.write_str(if *v { "true" } else { "false" }),
        JsonNode::Primitive(JsonPrimitive::Number(n)) => write!(f, "{n}"),
        JsonNode::Primitive(JsonPrimitive::String(s)) => write_escaped(f, s),
        JsonNode::Array(array) => write_array(f, array, pretty, depth),
        JsonNode::Object(object) => write_object(f, object, pretty, depth),
    }
}

fn write_array(f: &mut fmt::Formatter<'_>, array: &JsonArray, pretty: bool, depth: usize) -> fmt::Result {
    if array.is_empty() {
        return f.write_str("[]");
    }
    f.write_char('[')?;
    for (index, item) in array.iter().enumerate() {
        if index > 0 {
            f.write_char(',')?;
        }
        write_newline(f, pretty, depth + 1)?;
        write_node(f, item, pretty, depth + 1)?;
    }
    write_newline(f, pretty, depth)?;
    f.write_char(']')
}

fn write_object(f: &mut fmt::Formatter<'_>, object: &JsonObject, pretty: bool, depth: usize) -> fmt::Result {
    if object.is_empty() {
        return f.write_str("{}");
    }
    f.write_char('{')?;
    for (index, (key, value)) in object.iter().enumerate() {
        if index > 0 {
            f.write_char(',')?;
        }
        write_newline(f, pretty, depth + 1)?;
        write_escaped(f, key)?;
        f.write_str(if pretty { ": " } else { ":" })?;
        write_node(f, value, pretty, depth + 1)?;
    }
    write_newline(f, pretty, depth)?;
    f.write_char('}')
}

#[inline]
fn write_newline(f: &mut fmt::Formatter<'_>, pretty: bool, depth: usize) -> fmt::Result {
    if pretty {
        f.write_char('\n')?;
        for _ in 0..depth {
            f.write_str("  ")?;
        }
    }
    Ok(())
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if c < ' ' => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use crate::{JsonNode, JsonObject};
    use alloc::format;
    use alloc::string::ToString;

    fn sample() -> JsonNode {
        let mut object = JsonObject::new();
        object.insert("name", "a \"quoted\"\nline");
        object.insert("list", JsonNode::from_iter([1.5, -2.0]));
        object.insert("empty", JsonObject::new());
        object.insert("none", JsonNode::Null);
        object.into()
    }

    #[test]
    fn compact() {
        assert_eq!(
            sample().to_string(),
            r#"{"name":"a \"quoted\"\nline","list":[1.5,-2.0],"empty":{},"none":null}"#
        );
    }

    #[test]
    fn pretty() {
        let expected = "{\n  \"name\": \"a \\\"quoted\\\"\\nline\",\n  \"list\": [\n    1.5,\n    -2.0\n  ],\n  \"empty\": {},\n  \"none\": null\n}";
        assert_eq!(format!("{:#}", sample()), expected);
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(JsonNode::from("\u{1}").to_string(), r#""\u0001""#);
    }
}
