use std::io::Cursor;
use calamine::{open_workbook, Reader, Xlsx};
use namesmith::export::{COLUMN_HEADER, SHEET_NAME, SUGGESTED_FILE_NAME, XLSX_MIME_TYPE};
use namesmith::{ResponseParser, ResultExporter};
use tokio_test::assert_ok;

fn sheet_rows<R>(workbook: &mut Xlsx<R>) -> Vec<String>
where
  R: std::io::Read + std::io::Seek,
{   let range = workbook
      .worksheet_range(SHEET_NAME)
      .expect("sheet exists");
    range.rows()
      .map(|row| {
        assert_eq!(row.len(), 1, "single column expected");
        row[0].to_string()
      })
      .collect()
}

#[test]
fn test_export_keeps_order_under_header()
{   let list = ResponseParser::default()
      .parse("Nexify\nVelocix", 5)
      .expect("names");
    let artifact = ResultExporter::new().export(&list);
    assert_eq!(artifact.header, COLUMN_HEADER);
    assert_eq!(artifact.row_count(), 2);
    assert_eq!(artifact.rows, vec!["Nexify", "Velocix"]);

    let bytes = assert_ok!(artifact.to_xlsx_bytes());
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
      .expect("readable workbook");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    assert_eq!(
      sheet_rows(&mut workbook),
      vec!["Brand Name", "Nexify", "Velocix"]
    );
}

#[test]
fn test_download_metadata_matches_workbook_format()
{   assert!(SUGGESTED_FILE_NAME.ends_with(".xlsx"));
    assert_eq!(
      XLSX_MIME_TYPE,
      "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let list = ResponseParser::default().parse("Zento", 1).expect("names");
    let bytes = assert_ok!(ResultExporter::new().export(&list).to_xlsx_bytes());
    // xlsx is a zip container
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_export_escapes_markup()
{   let list = ResponseParser::default()
      .parse("Fox & Hound\nLess<More", 5)
      .expect("names");
    let bytes = assert_ok!(ResultExporter::new().export(&list).to_xlsx_bytes());
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
      .expect("readable workbook");
    assert_eq!(
      sheet_rows(&mut workbook),
      vec!["Brand Name", "Fox & Hound", "Less<More"]
    );
}

#[test]
fn test_write_xlsx_to_disk()
{   let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(namesmith::export::SUGGESTED_FILE_NAME);
    let list = ResponseParser::default()
      .parse("Quantrix\nBoltly\nZento", 5)
      .expect("names");
    assert_ok!(ResultExporter::new().export(&list).write_xlsx(&path));

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("workbook on disk");
    assert_eq!(
      sheet_rows(&mut workbook),
      vec!["Brand Name", "Quantrix", "Boltly", "Zento"]
    );
}

#[test]
fn test_write_into_missing_directory_is_export_error()
{   let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("names.xlsx");
    let list = ResponseParser::default().parse("Zento", 1).expect("names");
    let err = ResultExporter::new()
      .export(&list)
      .write_xlsx(&path)
      .expect_err("directory does not exist");
    assert!(matches!(err, namesmith::Error::Export(_)));
}
