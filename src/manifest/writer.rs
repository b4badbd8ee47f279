use crate::error::{ResourceError, Result};
use crate::resource::ResourceCatalog;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;
use tracing::info;

pub const AUTO_GENERATED_NOTICE: &str = "This file is AUTO GENERATED, DO NOT EDIT MANUALLY.";

const OVERLAYABLE_LICENSE: &str = " Copyright (C) 2020 The Android Open Source Project

     Licensed under the Apache License, Version 2.0 (the \"License\");
     you may not use this file except in compliance with the License.
     You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

     Unless required by applicable law or agreed to in writing, software
     distributed under the License is distributed on an \"AS IS\" BASIS,
     WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
     See the License for the specific language governing permissions and
     limitations under the License.
";

/// Serializes catalogs into `current.xml` and `overlayable.xml`
pub struct ManifestWriter {
    indent: usize,
}

impl ManifestWriter {
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    /// Render the public manifest: one `<public>` per resource in manifest order
    pub fn render_manifest(&self, catalog: &ResourceCatalog) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        emit(
            &mut writer,
            Event::Comment(BytesText::from_escaped(AUTO_GENERATED_NOTICE)),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("resources")))?;
        for resource in catalog.sorted() {
            let public = BytesStart::new("public").with_attributes([
                ("type", resource.resource_type.as_str()),
                ("name", resource.name.as_str()),
            ]);
            emit(&mut writer, Event::Empty(public))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("resources")))?;

        finish(writer)
    }

    /// Render an `<overlayable>` declaration making every resource RRO-able
    pub fn render_overlayable(&self, catalog: &ResourceCatalog, name: &str) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        emit(
            &mut writer,
            Event::Comment(BytesText::from_escaped(OVERLAYABLE_LICENSE)),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("resources")))?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new("overlayable").with_attributes([("name", name)])),
        )?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new("policy").with_attributes([("type", "public")])),
        )?;
        for resource in catalog.sorted() {
            let item = BytesStart::new("item").with_attributes([
                ("type", resource.resource_type.as_str()),
                ("name", resource.name.as_str()),
            ]);
            emit(&mut writer, Event::Empty(item))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("policy")))?;
        emit(&mut writer, Event::End(BytesEnd::new("overlayable")))?;
        emit(&mut writer, Event::End(BytesEnd::new("resources")))?;

        finish(writer)
    }

    /// Write rendered XML, replacing any existing file
    pub fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ResourceError::io(parent, e))?;
            }
        }
        fs::write(path, contents).map_err(|e| ResourceError::io(path, e))?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ResourceError::Render {
            message: e.to_string(),
        })
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| ResourceError::Render {
        message: e.to_string(),
    })
}
