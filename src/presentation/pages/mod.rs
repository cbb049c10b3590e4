mod mobile_record_page;

pub use mobile_record_page::{MobileRecordPage, escape_html, format_limit, render_mobile_record_page};
