//! LinkSet resource-file generation
//!
//! Builds the NLM LinkOut resource documents uploaded to PubMed. Each
//! document is a `<LinkSet>` of `<Link>` entries, one per publication,
//! preceded by a DOCTYPE whose internal subset declares the `icon.url`
//! and `base.url` entities. The entity references inside the body must
//! land in the output bytes literally as `&icon.url;` / `&base.url;`:
//! the serializer escapes them to `&amp;icon.url;` like any other text,
//! so a targeted post-processing pass restores exactly those two
//! references. Other escaped ampersands in record data are left alone.

use crate::config::LinkSetConfig;
use crate::domain::errors::LinkoutError;
use crate::domain::result::Result;
use crate::domain::PublicationRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const ICON_ENTITY_REF: &str = "&icon.url;";
const BASE_ENTITY_REF: &str = "&base.url;";

/// A single run's UTC timestamp, shared by every filename the run emits
#[derive(Debug, Clone, Copy)]
pub struct RunStamp {
    at: DateTime<Utc>,
}

impl RunStamp {
    /// Captures the current UTC time
    pub fn now() -> Self {
        Self { at: Utc::now() }
    }

    /// Builds a stamp from a known instant (used by tests)
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Full ISO-8601 timestamp with colons replaced by `-` for
    /// filesystem safety
    pub fn stamp(&self) -> String {
        self.at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .replace(':', "-")
    }

    /// The run date (`YYYY-MM-DD`), used as the filename prefix
    pub fn date(&self) -> String {
        self.at.format("%Y-%m-%d").to_string()
    }

    /// Name of the per-run output directory
    pub fn run_dir_name(&self) -> String {
        format!("{}-pubmed-linkout-files", self.stamp())
    }
}

/// Filename for one resource file
///
/// Single-page runs omit the page number; multi-page runs append a
/// five-digit zero-padded page index so files sort in page order.
pub fn page_filename(date: &str, stub: &str, page_index: usize, total_pages: usize) -> String {
    if total_pages > 1 {
        format!("{date}_{stub}_{page_index:05}.xml")
    } else {
        format!("{date}_{stub}.xml")
    }
}

/// Builds LinkSet documents from pages of publication records
///
/// The builder assumes every record already passed the selector's
/// digits-only PMID predicate and does not re-validate.
#[derive(Debug)]
pub struct LinkSetBuilder {
    config: LinkSetConfig,
    strip_prefix_len: usize,
}

impl LinkSetBuilder {
    pub fn new(config: LinkSetConfig, strip_prefix_len: usize) -> Self {
        Self {
            config,
            strip_prefix_len,
        }
    }

    /// Renders one page of records as a complete UTF-8 document
    pub fn render_page(&self, records: &[PublicationRecord]) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

        writer
            .write_event(Event::Start(BytesStart::new("LinkSet")))
            .map_err(xml_err)?;

        for record in records {
            self.write_link(&mut writer, record)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("LinkSet")))
            .map_err(xml_err)?;

        let body = String::from_utf8(writer.into_inner())
            .map_err(|e| LinkoutError::Xml(format!("Serialized document is not UTF-8: {e}")))?;

        let mut document = self.doctype_header();
        document.push_str(&unescape_entity_refs(&body));
        document.push('\n');
        Ok(document)
    }

    /// XML prolog and DOCTYPE with the two entity declarations
    pub fn doctype_header(&self) -> String {
        format!(
            "<?xml version=\"1.0\" ?>\n\
             <!DOCTYPE LinkSet PUBLIC \"-//NLM//DTD LinkOut 1.0//EN\" \
             \"https://www.ncbi.nlm.nih.gov/projects/linkout/doc/LinkOut.dtd\" \
             [<!ENTITY icon.url \"{}\"> <!ENTITY base.url \"{}\">]>\n",
            self.config.icon_url, self.config.base_url
        )
    }

    fn write_link<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        record: &PublicationRecord,
    ) -> Result<()> {
        let public_id = record.item_id.stripped(self.strip_prefix_len);

        writer
            .write_event(Event::Start(BytesStart::new("Link")))
            .map_err(xml_err)?;

        write_text_element(writer, "LinkId", public_id)?;
        write_text_element(writer, "ProviderId", &self.config.provider_id)?;
        write_text_element(writer, "IconUrl", ICON_ENTITY_REF)?;

        writer
            .write_event(Event::Start(BytesStart::new("ObjectSelector")))
            .map_err(xml_err)?;
        write_text_element(writer, "Database", &self.config.target_database)?;
        writer
            .write_event(Event::Start(BytesStart::new("ObjectList")))
            .map_err(xml_err)?;
        write_text_element(writer, "ObjId", record.pmid.as_str())?;
        writer
            .write_event(Event::End(BytesEnd::new("ObjectList")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("ObjectSelector")))
            .map_err(xml_err)?;

        writer
            .write_event(Event::Start(BytesStart::new("ObjectUrl")))
            .map_err(xml_err)?;
        write_text_element(writer, "Base", BASE_ENTITY_REF)?;
        write_text_element(writer, "Rule", public_id)?;
        write_text_element(writer, "UrlName", &self.config.url_name)?;
        write_text_element(writer, "Attribute", &self.config.attribute)?;
        writer
            .write_event(Event::End(BytesEnd::new("ObjectUrl")))
            .map_err(xml_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("Link")))
            .map_err(xml_err)?;

        Ok(())
    }
}

/// Restores the two entity references the serializer escaped
///
/// Only `&amp;icon.url;` and `&amp;base.url;` are rewritten; any other
/// `&amp;` in the document (record text, configured URL names) stays
/// escaped.
fn unescape_entity_refs(body: &str) -> String {
    body.replace("&amp;icon.url;", ICON_ENTITY_REF)
        .replace("&amp;base.url;", BASE_ENTITY_REF)
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

fn xml_err(e: impl std::fmt::Display) -> LinkoutError {
    LinkoutError::Xml(e.to_string())
}
