use crate::error::{ResourceError, Result};
use crate::resource::{Resource, ResourceLocation};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Elements whose children are nested sub-resources, never public themselves
const STYLEABLE_TAG: &str = "declare-styleable";

/// Parser for `values*` resource files and manifests
///
/// Every direct child element of the root declares one resource. `<item>`
/// and `<public>` carry their type in a `type` attribute; every other tag
/// is its own type (`<string name="x">` is a `string`).
pub struct ValuesParser;

impl ValuesParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a values XML file from disk
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Resource>> {
        let contents = fs::read_to_string(path).map_err(|e| ResourceError::io(path, e))?;
        self.parse(path, &contents)
    }

    /// Parse the contents of a values XML file
    pub fn parse(&self, path: &Path, contents: &str) -> Result<Vec<Resource>> {
        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);

        let mut resources = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;

        loop {
            let event = reader.read_event().map_err(|source| ResourceError::Xml {
                path: path.to_path_buf(),
                source,
            })?;

            match event {
                Event::Start(ref e) => {
                    match depth {
                        0 => enter_root(path, &mut seen_root)?,
                        1 => resources.extend(self.declared_resource(
                            path,
                            contents,
                            reader.buffer_position(),
                            e,
                        )?),
                        _ => {}
                    }
                    depth += 1;
                }
                Event::Empty(ref e) => match depth {
                    0 => enter_root(path, &mut seen_root)?,
                    1 => resources.extend(self.declared_resource(
                        path,
                        contents,
                        reader.buffer_position(),
                        e,
                    )?),
                    _ => {}
                },
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(malformed(path, "document has no root element"));
        }
        if depth != 0 {
            return Err(malformed(path, "unexpected end of document inside an element"));
        }

        debug!("Parsed {}: {} resources", path.display(), resources.len());
        Ok(resources)
    }

    /// Turn a direct child of the root into a resource, if it declares one
    fn declared_resource(
        &self,
        path: &Path,
        contents: &str,
        end_of_tag: usize,
        element: &BytesStart<'_>,
    ) -> Result<Option<Resource>> {
        let tag = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        if tag == STYLEABLE_TAG {
            trace!("Skipping <{}> in {}", tag, path.display());
            return Ok(None);
        }

        let line = line_of_tag(contents, end_of_tag);
        let name = required_attribute(path, line, &tag, element, "name")?;
        let resource_type = if tag == "item" || tag == "public" {
            required_attribute(path, line, &tag, element, "type")?
        } else {
            tag
        };

        Ok(Some(
            Resource::new(name, resource_type)
                .with_location(ResourceLocation::new(path, Some(line))),
        ))
    }
}

impl Default for ValuesParser {
    fn default() -> Self {
        Self::new()
    }
}

fn enter_root(path: &Path, seen_root: &mut bool) -> Result<()> {
    if *seen_root {
        return Err(malformed(path, "more than one root element"));
    }
    *seen_root = true;
    Ok(())
}

fn required_attribute(
    path: &Path,
    line: usize,
    tag: &str,
    element: &BytesStart<'_>,
    attribute: &'static str,
) -> Result<String> {
    let xml_error = |source: quick_xml::Error| ResourceError::Xml {
        path: path.to_path_buf(),
        source,
    };

    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(e.into()))?;
        if attr.key.as_ref() == attribute.as_bytes() {
            let value = attr.unescape_value().map_err(xml_error)?;
            return Ok(value.into_owned());
        }
    }

    Err(ResourceError::MissingAttribute {
        path: path.to_path_buf(),
        line,
        element: tag.to_string(),
        attribute,
    })
}

/// 1-based line of the start tag that ends at byte offset `end_of_tag`
fn line_of_tag(contents: &str, end_of_tag: usize) -> usize {
    let before = contents.get(..end_of_tag).unwrap_or(contents);
    let start = before.rfind('<').unwrap_or(0);
    before[..start].matches('\n').count() + 1
}

fn malformed(path: &Path, message: &str) -> ResourceError {
    ResourceError::MalformedXml {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
