//! In-memory XML element tree
//!
//! Job configurations are built and read through this tree: named elements
//! with ordered attributes, ordered child elements and text content. Parsing
//! is delegated to `roxmltree`, writing to `quick_xml` with the two-space
//! indented layout the CI engine itself writes.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{CodecError, Result};
use crate::version;

/// A single XML element and its subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content; empty for elements without text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Value of an attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child and return it for further building
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Append an empty child named `tag`
    pub fn create_child(&mut self, tag: impl Into<String>) -> &mut Element {
        self.push_child(Element::new(tag))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child named `tag`
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|child| child.tag == tag)
    }

    /// All children named `tag`, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Follow a chain of child tags from this element
    pub fn select_path(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |element, tag| element.child(tag))
    }

    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(Element::text)
    }

    /// Text of the first child named `tag`, or an empty string
    pub fn child_string(&self, tag: &str) -> String {
        self.child_text(tag).unwrap_or_default().to_string()
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = Element::new(node.tag_name().name());

        for attribute in node.attributes() {
            element
                .attributes
                .push((attribute.name().to_string(), attribute.value().to_string()));
        }

        for child in node.children() {
            if child.is_element() {
                element.children.push(Element::from_node(child));
            } else if child.is_text() {
                element.text.push_str(child.text().unwrap_or_default());
            }
        }

        // Indentation between child elements is not content.
        if !element.children.is_empty() && element.text.trim().is_empty() {
            element.text.clear();
        }

        element
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        check_characters(&self.tag, &self.text)?;
        for (_, value) in &self.attributes {
            check_characters(&self.tag, value)?;
        }

        let start = BytesStart::new(self.tag.as_str()).with_attributes(
            self.attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        if self.children.is_empty() && self.text.is_empty() {
            return emit(writer, Event::Empty(start));
        }

        emit(writer, Event::Start(start))?;
        if !self.text.is_empty() {
            emit(writer, Event::Text(BytesText::from_escaped(escape_text(&self.text))))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        emit(writer, Event::End(BytesEnd::new(self.tag.as_str())))
    }
}

const INDENT_SIZE: usize = 2;

/// A parsed or generated XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse XML text into an owned tree
    pub fn parse(text: &str) -> std::result::Result<Self, roxmltree::Error> {
        let document = roxmltree::Document::parse(text)?;
        Ok(Self {
            root: Element::from_node(document.root_element()),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize with the XML declaration and two-space indentation
    ///
    /// Fails when a text or attribute value holds a character XML cannot
    /// carry, such as a terminal escape.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new(version::PARSED_VERSION, Some("UTF-8"), None)),
        )?;
        self.root.write(&mut writer)?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|err| CodecError::Write(err.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|err| CodecError::Write(err.to_string()))
}

/// Escape markup, keeping carriage returns from being normalized on parse
fn escape_text(text: &str) -> String {
    escape(text).replace('\r', "&#13;")
}

/// Reject characters outside the XML `Char` production
fn check_characters(tag: &str, text: &str) -> Result<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(ch) => Err(CodecError::InvalidCharacter {
            tag: tag.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_write() {
        let mut root = Element::new("project").with_attr("plugin", "workflow-job");
        root.create_child("description").set_text("demo");
        root.create_child("properties");

        let xml = Document::new(root).to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <project plugin=\"workflow-job\">\n  \
             <description>demo</description>\n  \
             <properties/>\n\
             </project>\n"
        );
    }

    #[test]
    fn test_parse_selects_children_and_attributes() {
        let xml = r#"<?xml version='1.0' encoding='UTF-8'?>
<root>
  <source class="jenkins.plugins.git.GitSCMSource" plugin="git">
    <remote>https://example.com/repo.git</remote>
  </source>
  <item>one</item>
  <item>two</item>
</root>"#;

        let document = Document::parse(xml).unwrap();
        let root = document.root();
        assert_eq!(root.tag(), "root");
        assert_eq!(root.text(), "");

        let source = root.child("source").unwrap();
        assert_eq!(source.attr("class"), Some("jenkins.plugins.git.GitSCMSource"));
        assert_eq!(source.attr("missing"), None);
        assert_eq!(
            source.child_text("remote"),
            Some("https://example.com/repo.git")
        );

        let items: Vec<&str> = root.children_named("item").map(Element::text).collect();
        assert_eq!(items, vec!["one", "two"]);
        assert_eq!(root.child_string("absent"), "");
    }

    #[test]
    fn test_select_path() {
        let root = Element::new("a").with_child(
            Element::new("b").with_child(Element::new("c").with_text("deep")),
        );

        assert_eq!(root.select_path(&["b", "c"]).map(Element::text), Some("deep"));
        assert!(root.select_path(&["b", "x"]).is_none());
        assert_eq!(root.select_path(&[]).map(Element::tag), Some("a"));
    }

    #[test]
    fn test_special_characters_survive() {
        let script = "node {\n  sh 'test -f a && echo \"<ok>\"'\n}";
        let root = Element::new("definition")
            .with_attr("note", "a \"quoted\" & <tagged> value")
            .with_child(Element::new("script").with_text(script));

        let xml = Document::new(root.clone()).to_xml_string().unwrap();
        let parsed = Document::parse(&xml).unwrap();
        assert_eq!(parsed.root(), &root);
    }

    #[test]
    fn test_carriage_return_survives() {
        let root = Element::new("script").with_text("line one\r\nline two");
        let xml = Document::new(root.clone()).to_xml_string().unwrap();
        assert!(xml.contains("&#13;"));
        assert_eq!(Document::parse(&xml).unwrap().root(), &root);
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let root = Element::new("definition")
            .with_child(Element::new("script").with_text("echo '\u{1b}[31mred\u{1b}[0m'"));

        match Document::new(root).to_xml_string() {
            Err(CodecError::InvalidCharacter { tag, ch }) => {
                assert_eq!(tag, "script");
                assert_eq!(ch, '\u{1b}');
            }
            other => panic!("expected invalid character, got {:?}", other),
        }

        let root = Element::new("trust").with_attr("class", "Trust\u{0}");
        assert!(matches!(
            Document::new(root).to_xml_string(),
            Err(CodecError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_xml_char_ranges() {
        for c in ['\t', '\n', '\r', ' ', 'é', '\u{FFFD}', '\u{1F600}'] {
            assert!(is_xml_char(c), "{:?} should be allowed", c);
        }
        for c in ['\u{0}', '\u{8}', '\u{b}', '\u{1b}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(c), "{:?} should be rejected", c);
        }
    }

    #[test]
    fn test_set_attr_replaces_existing_value() {
        let mut element = Element::new("choices");
        element.set_attr("class", "first");
        element.set_attr("class", "second");
        assert_eq!(element.attr("class"), Some("second"));
    }

    #[test]
    fn test_parse_invalid_xml() {
        assert!(Document::parse("<unclosed>").is_err());
    }
}
