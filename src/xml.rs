//! Attribute-level helpers shared by the camera, light and spp loaders.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use glam::Vec3;
use roxmltree::{Document, Node};

use crate::error::LoadError;

/// Reads an XML file into memory.
pub(crate) fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse<'i>(path: &Path, text: &'i str) -> Result<Document<'i>, LoadError> {
    Document::parse(text).map_err(|source| LoadError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the document root if it carries the expected tag name.
pub(crate) fn root<'a, 'i>(
    document: &'a Document<'i>,
    path: &Path,
    tag: &str,
) -> Result<Node<'a, 'i>, LoadError> {
    let root = document.root_element();
    if !root.has_tag_name(tag) {
        return Err(LoadError::MalformedDocument {
            path: path.to_path_buf(),
            reason: format!(
                "expected <{tag}> root element, found <{}>",
                root.tag_name().name()
            ),
        });
    }
    Ok(root)
}

/// Direct child elements of `parent` named `tag`, in document order.
pub(crate) fn children<'a, 'i: 'a>(
    parent: Node<'a, 'i>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    parent.children().filter(move |child| child.has_tag_name(tag))
}

/// Typed attribute access for a single element, carrying the source path for
/// error reporting.
pub(crate) struct Element<'a, 'i, 'p> {
    node: Node<'a, 'i>,
    path: &'p Path,
}

impl<'a, 'i: 'a, 'p> Element<'a, 'i, 'p> {
    pub(crate) fn new(node: Node<'a, 'i>, path: &'p Path) -> Self {
        Self { node, path }
    }

    pub(crate) fn optional_str(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    pub(crate) fn required_str(&self, name: &str) -> Result<&'a str, LoadError> {
        self.optional_str(name)
            .ok_or_else(|| LoadError::MalformedDocument {
                path: self.path.to_path_buf(),
                reason: format!(
                    "<{}> is missing the '{name}' attribute",
                    self.node.tag_name().name()
                ),
            })
    }

    /// Float attribute; an absent attribute reads as zero.
    pub(crate) fn f32_or_zero(&self, name: &str) -> Result<f32, LoadError> {
        match self.optional_str(name) {
            Some(value) => self.parse_value(name, value),
            None => Ok(0.0),
        }
    }

    pub(crate) fn vec3_or_zero(&self, x: &str, y: &str, z: &str) -> Result<Vec3, LoadError> {
        Ok(Vec3::new(
            self.f32_or_zero(x)?,
            self.f32_or_zero(y)?,
            self.f32_or_zero(z)?,
        ))
    }

    pub(crate) fn required<T: FromStr>(&self, name: &str) -> Result<T, LoadError> {
        let value = self.required_str(name)?;
        self.parse_value(name, value)
    }

    fn parse_value<T: FromStr>(&self, name: &str, value: &str) -> Result<T, LoadError> {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| LoadError::InvalidAttribute {
                path: self.path.to_path_buf(),
                element: self.node.tag_name().name().to_string(),
                attribute: name.to_string(),
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "inline.xml";

    #[test]
    fn root_with_wrong_tag_is_malformed() {
        let document = Document::parse("<other/>").unwrap();
        let err = root(&document, Path::new(PATH), "cam_list").unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument { .. }));
        assert!(err.to_string().contains("cam_list"));
    }

    #[test]
    fn children_skip_other_tags_and_nested_elements() {
        let document =
            Document::parse("<list><a/><b><a/></b><a/>text</list>").unwrap();
        let list = root(&document, Path::new(PATH), "list").unwrap();
        assert_eq!(children(list, "a").count(), 2);
    }

    #[test]
    fn absent_floats_read_as_zero() {
        let document = Document::parse(r#"<e x="1.5" y=" 2 "/>"#).unwrap();
        let element = Element::new(document.root_element(), Path::new(PATH));
        assert_eq!(
            element.vec3_or_zero("x", "y", "z").unwrap(),
            Vec3::new(1.5, 2.0, 0.0)
        );
    }

    #[test]
    fn unparsable_values_are_reported() {
        let document = Document::parse(r#"<camera cpx="abc"/>"#).unwrap();
        let element = Element::new(document.root_element(), Path::new(PATH));
        match element.f32_or_zero("cpx") {
            Err(LoadError::InvalidAttribute {
                element,
                attribute,
                value,
                ..
            }) => {
                assert_eq!(element, "camera");
                assert_eq!(attribute, "cpx");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidAttribute, got {other:?}"),
        }
    }

    #[test]
    fn required_attribute_must_be_present() {
        let document = Document::parse("<spp/>").unwrap();
        let element = Element::new(document.root_element(), Path::new(PATH));
        assert!(matches!(
            element.required::<u32>("iter_num"),
            Err(LoadError::MalformedDocument { .. })
        ));
    }
}
