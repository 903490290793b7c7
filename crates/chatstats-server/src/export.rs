use anyhow::Result;
use chatstats_core::stats::SenderCount;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const COLUMNS: [&str; 4] = ["First Name", "Last Name", "Username", "Message Count"];
const HEADER_ROW: u32 = 4;
const HEADER_FILL: u32 = 0x4F81BD;

/// Human description of the range plus the filename suffix, e.g.
/// `("2024-01-01 to 2024-02-01", "-2024-01-01_2024-02-01")`.
pub fn describe_range(start_date: Option<&str>, end_date: Option<&str>) -> (String, String) {
    match (start_date, end_date) {
        (Some(start), Some(end)) => (format!("{start} to {end}"), format!("-{start}_{end}")),
        (Some(start), None) => (format!("from {start}"), format!("-{start}")),
        (None, Some(end)) => (format!("until {end}"), format!("-{end}")),
        (None, None) => (String::new(), String::new()),
    }
}

pub fn file_name(topic: &str, start_date: Option<&str>, end_date: Option<&str>) -> String {
    let (_, time_part) = describe_range(start_date, end_date);
    format!("Stats-{topic}{time_part}.xlsx")
}

/// Builds the export workbook: merged title row, topic/range metadata block,
/// styled header row, one row per group, auto-sized columns.
pub fn build_workbook(topic: &str, time_info: &str, rows: &[SenderCount]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Statistics")?;

    let title = Format::new()
        .set_bold()
        .set_font_size(16)
        .set_align(FormatAlign::Center);
    sheet.merge_range(0, 0, 0, COLUMNS.len() as u16 - 1, "Statistics Report", &title)?;

    sheet.write_string(1, 0, "Topic:")?;
    sheet.write_string(1, 1, topic)?;
    sheet.write_string(2, 0, "Time Interval:")?;
    sheet.write_string(2, 1, time_info)?;

    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(HEADER_ROW, col as u16, *name, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = HEADER_ROW + 1 + i as u32;
        if let Some(name) = &row.sender_first_name {
            sheet.write_string(r, 0, name)?;
        }
        if let Some(name) = &row.sender_last_name {
            sheet.write_string(r, 1, name)?;
        }
        if let Some(name) = &row.sender_username {
            sheet.write_string(r, 2, name)?;
        }
        sheet.write_number(r, 3, row.message_count as f64)?;
    }

    // Widths track the widest rendered cell from the header row down.
    for (col, name) in COLUMNS.iter().enumerate() {
        let mut width = name.len();
        for row in rows {
            let cell_len = match col {
                0 => row.sender_first_name.as_deref().map_or(0, str::len),
                1 => row.sender_last_name.as_deref().map_or(0, str::len),
                2 => row.sender_username.as_deref().map_or(0, str::len),
                _ => row.message_count.to_string().len(),
            };
            width = width.max(cell_len);
        }
        sheet.set_column_width(col as u16, (width + 2) as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}
