use std::io::{Cursor, Write};

use base64::{engine::general_purpose, Engine as _};
use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Reader as QuickXmlReader;
use quick_xml::Writer as QuickXmlWriter;
use secstr::SecVec;

use crate::constants::key_file_xml_element::*;
use crate::constants::{GENERATED_KEY_SIZE, KEY_FILE_XML_VERSION};
use crate::crypto;
use crate::error::{Error, Result};

/// Key file material associated with a database
///
/// Only the key derived from the file content is kept. That key is the part
/// that goes into the composite key.
#[derive(Clone)]
pub struct FileKey {
    file_name: String,
    // This is the hash of the whole content of a file or hash key from a keyx file
    content_hash: SecVec<u8>,
}

impl FileKey {
    pub fn from_bytes(file_name: &str, data: Vec<u8>) -> Result<FileKey> {
        debug!(
            "FileKey from_bytes is called for {} with {} bytes",
            file_name,
            data.len()
        );
        let content_hash = Self::calculate_hash(&data)?;
        Ok(Self {
            file_name: file_name.into(),
            content_hash: SecVec::new(content_hash),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_hash(&self) -> Vec<u8> {
        self.content_hash.unsecure().to_vec()
    }

    /// Generates the content of a new xml key file
    pub fn generate_xml() -> Result<Vec<u8>> {
        let key_file_data = KeyFileData::generate_key_data()?;
        let mut buf = Cursor::new(Vec::new());
        FileKeyXmlWriter::new_with_indent(&mut buf).write(&key_file_data)?;
        Ok(buf.into_inner())
    }

    // Extracts the key from <Data> ...</Data> element of a keyx xml or
    // derives it from the bytes content of any other file
    fn calculate_hash(buf: &[u8]) -> Result<Vec<u8>> {
        match FileKeyXmlReader::new(buf).parse() {
            Ok(key_file_data) => {
                debug!("Found xml key file and extracting the key data");
                key_file_data.key_data()
            }
            Err(e) => {
                debug!("Key file is not a supported xml key file ({}) and using its content", e);
                Ok(Self::content_key(buf))
            }
        }
    }

    // A 32 bytes file is the key itself and 64 hex chars are its hex form.
    // Any other content is hashed
    fn content_key(buf: &[u8]) -> Vec<u8> {
        if buf.len() == 32 {
            return buf.to_vec();
        }
        if buf.len() == 64 {
            if let Ok(key) = hex::decode(buf) {
                return key;
            }
        }
        crypto::do_slice_sha256_hash(buf)
    }
}

#[derive(Default, Debug)]
pub struct KeyFileData {
    pub version: Option<String>,
    pub hash: Option<String>,
    pub data: Option<String>,
}

impl KeyFileData {
    fn major_version(&self) -> Option<&str> {
        self.version.as_deref().and_then(|v| v.trim().split('.').next())
    }

    pub fn is_supported_version(&self) -> bool {
        matches!(self.major_version(), Some("1") | Some("2"))
    }

    // Version 1 keeps the key in base64 and version 2 in hex with an optional checksum
    pub fn key_data(&self) -> Result<Vec<u8>> {
        let data = self
            .data
            .as_deref()
            .ok_or(Error::DataError("Key file invalid key data"))?;

        if self.major_version() == Some("1") {
            return Ok(general_purpose::STANDARD.decode(data)?);
        }

        let data_vec = hex::decode(data)?;
        if let Some(hash) = self.hash.as_deref().filter(|h| !h.is_empty()) {
            let d = crypto::do_slice_sha256_hash(&data_vec);
            let h = hex::decode(hash)?;
            // First 4 bytes of hash of the decoded key data should match the checksum hash bytes
            if d[..4] != h[..] {
                return Err(Error::DataError("Key file checksum failed"));
            }
        }
        Ok(data_vec)
    }

    pub fn generate_key_data() -> Result<Self> {
        let data_vec = crypto::get_random_bytes::<GENERATED_KEY_SIZE>()?;
        let data_vec_hash = crypto::do_slice_sha256_hash(&data_vec);

        Ok(Self {
            version: Some(KEY_FILE_XML_VERSION.into()),
            data: Some(hex::encode_upper(&data_vec)),
            hash: Some(hex::encode_upper(&data_vec_hash[..4])),
        })
    }
}

struct FileKeyXmlReader<'a> {
    reader: QuickXmlReader<&'a [u8]>,
}

impl<'a> FileKeyXmlReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        let mut reader = QuickXmlReader::from_reader(data);
        reader.trim_text(true);
        Self { reader }
    }

    // Any content without a leading xml declaration is not a keyx file
    fn parse(&mut self) -> Result<KeyFileData> {
        let mut buf: Vec<u8> = vec![];
        let mut xml_decl_available = false;
        let mut key_file_data = KeyFileData::default();
        // Names of the currently open elements
        let mut path: Vec<Vec<u8>> = vec![];

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Decl(_)) => {
                    xml_decl_available = true;
                }
                Ok(Event::Start(ref e)) => {
                    if !xml_decl_available {
                        return Err(Error::NotXmlKeyFile);
                    }
                    let name = e.name().as_ref().to_vec();
                    // Any other xml document is used as a plain key file
                    if path.is_empty() && name != KEY_FILE {
                        return Err(Error::NotXmlKeyFile);
                    }
                    if name == KEY_FILE_DATA {
                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            if attr.key.as_ref() == KEY_FILE_DATA_HASH {
                                key_file_data.hash =
                                    Some(std::str::from_utf8(&attr.value)?.to_string());
                            }
                        }
                    }
                    path.push(name);
                }
                Ok(Event::Text(ref e)) => {
                    if !xml_decl_available {
                        return Err(Error::NotXmlKeyFile);
                    }
                    let content = e.unescape()?.to_string();
                    match path.last().map(|n| n.as_slice()) {
                        Some(KEY_FILE_VERSION) => key_file_data.version = Some(content),
                        // Data may be formatted in groups across lines
                        Some(KEY_FILE_DATA) => {
                            key_file_data.data =
                                Some(content.split_whitespace().collect::<Vec<_>>().join(""))
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(_)) => {
                    path.pop();
                }
                Ok(Event::Eof) => {
                    if !xml_decl_available {
                        return Err(Error::NotXmlKeyFile);
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    if !xml_decl_available {
                        return Err(Error::NotXmlKeyFile);
                    } else {
                        return Err(Error::from(e));
                    }
                }
            }
            buf.clear();
        }

        if !key_file_data.is_supported_version() {
            return Err(Error::UnsupportedXmlKeyFileVersion);
        }
        Ok(key_file_data)
    }
}

struct FileKeyXmlWriter<W: Write> {
    writer: QuickXmlWriter<W>,
}

impl<W: Write> FileKeyXmlWriter<W> {
    fn new_with_indent(writer: W) -> Self {
        Self {
            writer: QuickXmlWriter::new_with_indent(writer, b' ', 2),
        }
    }

    fn write_text_element(&mut self, tag: &[u8], text: &str) -> Result<()> {
        let tag = std::str::from_utf8(tag)?;
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn write_meta(&mut self, key_file_data: &KeyFileData) -> Result<()> {
        let tag = std::str::from_utf8(KEY_FILE_META)?;
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        let version = key_file_data
            .version
            .as_deref()
            .unwrap_or(KEY_FILE_XML_VERSION);
        self.write_text_element(KEY_FILE_VERSION, version)?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn write_key_data(&mut self, key_file_data: &KeyFileData) -> Result<()> {
        let key_tag = std::str::from_utf8(KEY_FILE_KEY)?;
        let data_tag = std::str::from_utf8(KEY_FILE_DATA)?;
        let hash_attr = std::str::from_utf8(KEY_FILE_DATA_HASH)?;
        let h = key_file_data.hash.as_deref().unwrap_or_default();
        let d = key_file_data.data.as_deref().unwrap_or_default();

        self.writer
            .write_event(Event::Start(BytesStart::new(key_tag)))?;
        let mut data_start = BytesStart::new(data_tag);
        data_start.push_attribute((hash_attr, h));
        self.writer.write_event(Event::Start(data_start))?;
        self.writer
            .write_event(Event::Text(BytesText::new(&Self::format_hash_data(d))))?;
        self.writer
            .write_event(Event::End(BytesEnd::new(data_tag)))?;
        self.writer.write_event(Event::End(BytesEnd::new(key_tag)))?;
        Ok(())
    }

    // Groups the hex text in blocks of 8 characters as other KeePass apps do
    fn format_hash_data(data: &str) -> String {
        data.as_bytes()
            .chunks(8)
            .map(|c| String::from_utf8_lossy(c).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn write(&mut self, key_file_data: &KeyFileData) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let tag = std::str::from_utf8(KEY_FILE)?;
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        self.write_meta(key_file_data)?;
        self.write_key_data(key_file_data)?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }
}
