//! Spreadsheet export of a candidate list

use std::io::{Cursor, Write};
use std::path::Path;
use log::{debug, error, info};
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;

pub const SHEET_NAME: &str = "Brand Names";
pub const COLUMN_HEADER: &str = "Brand Name";
pub const SUGGESTED_FILE_NAME: &str = "brand_names.xlsx";
pub const XLSX_MIME_TYPE: &str
  = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const CONTENT_TYPES_XML: &str = concat!(
  r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
  r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
  r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
  r#"<Default Extension="xml" ContentType="application/xml"/>"#,
  r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
  r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
  r#"</Types>"#
);

const ROOT_RELS_XML: &str = concat!(
  r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
  r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
  r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
  r#"</Relationships>"#
);

const WORKBOOK_RELS_XML: &str = concat!(
  r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
  r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
  r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
  r#"</Relationships>"#
);

/// Single-column table: header plus one row per name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularArtifact
{   pub sheet_name: String
  , pub header: String
  , pub rows: Vec<String>
}

impl TabularArtifact
{   /// Number of data rows, header excluded
    pub fn row_count(&self) -> usize
    {   self.rows.len()
    }

    /// Encode as an Office Open XML workbook
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>, crate::error::Error>
    {   let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let parts: [(&str, String); 5] =
        [   ("[Content_Types].xml", CONTENT_TYPES_XML.to_string())
          , ("_rels/.rels", ROOT_RELS_XML.to_string())
          , ("xl/workbook.xml", self.workbook_xml())
          , ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string())
          , ("xl/worksheets/sheet1.xml", self.sheet_xml())
        ];
        for (name, body) in parts
        {   let options = SimpleFileOptions::default()
              .compression_method(zip::CompressionMethod::Deflated);
            zip.start_file(name, options).map_err(|e| {
              error!("Cannot start {}: {}", name, e);
              crate::error::Error::Export(
                "could not assemble the workbook".to_string()
              )
            })?;
            zip.write_all(body.as_bytes()).map_err(|e| {
              error!("Cannot write {}: {}", name, e);
              crate::error::Error::Export(
                "could not assemble the workbook".to_string()
              )
            })?;
        }

        let bytes = zip.finish()
          .map_err(|e| {
            error!("Cannot finish workbook: {}", e);
            crate::error::Error::Export(
              "could not assemble the workbook".to_string()
            )
          })?
          .into_inner();
        debug!("Workbook encoded: {} bytes", bytes.len());
        Ok(bytes)
    }

    /// Encode and write the workbook to `path`
    pub fn write_xlsx(&self, path: &Path)
      -> Result<(), crate::error::Error>
    {   let bytes = self.to_xlsx_bytes()?;
        std::fs::write(path, bytes).map_err(|e| {
          error!("Cannot write {}: {}", path.display(), e);
          crate::error::Error::Export(
            format!("could not write {}", path.display())
          )
        })?;
        info!("Wrote {} names to {}", self.rows.len(), path.display());
        Ok(())
    }

    fn workbook_xml(&self) -> String
    {   format!(
          concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
            r#"</workbook>"#
          ),
          escape(self.sheet_name.as_str())
        )
    }

    fn sheet_xml(&self) -> String
    {   let mut rows = String::new();
        let cells = std::iter::once(&self.header).chain(self.rows.iter());
        for (index, value) in cells.enumerate()
        {   let row = index + 1;
            rows.push_str(&format!(
              r#"<row r="{row}"><c r="A{row}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c></row>"#,
              escape(value.as_str())
            ));
        }
        format!(
          concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
            r#"<dimension ref="A1:A{}"/>"#,
            r#"<sheetData>{}</sheetData>"#,
            r#"</worksheet>"#
          ),
          self.rows.len() + 1,
          rows
        )
    }
}

/// Candidate list to table
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultExporter;

impl ResultExporter
{   pub fn new() -> Self
    {   ResultExporter
    }

    /// Pure: keeps the list order, one row per name
    pub fn export(&self, list: &crate::CandidateList) -> TabularArtifact
    {   TabularArtifact
        {   sheet_name: SHEET_NAME.to_string()
          , header: COLUMN_HEADER.to_string()
          , rows: list.names().to_vec()
        }
    }
}
