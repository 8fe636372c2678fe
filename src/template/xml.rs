//! Conversion between folder trees and the template XML format:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <root templateName="Standard">
//!   <folder text="Scenes"/>
//!   <folder text="Textures">
//!     <folder text="Raw"/>
//!   </folder>
//! </root>
//! ```
//!
//! Only the `text` attribute of each nested element is read back, whatever
//! the element is called.

use super::{FolderNode, Template};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, Event},
    Reader, Writer,
};
use thiserror::Error;

pub const ROOT_TAG: &str = "root";
pub const FOLDER_TAG: &str = "folder";
pub const NAME_ATTR: &str = "text";
pub const TEMPLATE_NAME_ATTR: &str = "templateName";

#[derive(Error, Debug)]
pub enum XmlError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("folder element without a '{}' attribute", NAME_ATTR)]
    MissingName,
    #[error("element '{0}' is not closed")]
    Unclosed(String),
    #[error("more than one root element")]
    SecondRoot,
}

/// Renders `template` with two-space indentation, one element per line.
pub fn to_xml(template: &Template) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute((TEMPLATE_NAME_ATTR, template.name.as_str()));
    write_element(&mut writer, root, &template.root.children)?;

    let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    xml.push('\n');
    Ok(xml)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    children: &[FolderNode],
) -> Result<(), XmlError> {
    if children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    writer.write_event(Event::Start(start))?;
    for child in children {
        let mut folder = BytesStart::new(FOLDER_TAG);
        folder.push_attribute((NAME_ATTR, child.name.as_str()));
        write_element(writer, folder, &child.children)?;
    }
    writer.write_event(Event::End(end))?;
    Ok(())
}

/// Reads a folder tree back. The document element becomes the unnamed root;
/// an empty document is an empty tree.
pub fn from_xml(xml: &str) -> Result<FolderNode, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut open: Vec<FolderNode> = vec![];
    let mut root: Option<FolderNode> = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let node = node_for(&e, open.is_empty(), root.is_some())?;
                open.push(node);
            }
            Event::Empty(e) => {
                let node = node_for(&e, open.is_empty(), root.is_some())?;
                close(node, &mut open, &mut root);
            }
            Event::End(_) => {
                if let Some(node) = open.pop() {
                    close(node, &mut open, &mut root);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(unclosed) = open.last() {
        let name = if open.len() == 1 {
            ROOT_TAG.to_string()
        } else {
            unclosed.name.clone()
        };
        return Err(XmlError::Unclosed(name));
    }
    Ok(root.unwrap_or_default())
}

fn node_for(e: &BytesStart<'_>, top_level: bool, have_root: bool) -> Result<FolderNode, XmlError> {
    if !top_level {
        let name = e
            .try_get_attribute(NAME_ATTR)?
            .ok_or(XmlError::MissingName)?
            .unescape_value()?
            .into_owned();
        return Ok(FolderNode::new(name));
    }
    if have_root {
        return Err(XmlError::SecondRoot);
    }
    Ok(FolderNode::root())
}

fn close(node: FolderNode, open: &mut Vec<FolderNode>, root: &mut Option<FolderNode>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}
