use oko_core::report::{RecordBlock, ReportSummary, MAX_EMAILS_SHOWN};

const PAGE_STYLE: &str = r#"
body { background: #1a1a1a; color: #fff; font-family: sans-serif; margin: 0; }
.report-header { background: #252525; padding: 20px; margin: 20px; border-radius: 16px; }
.report-header h1 { color: #00ff88; margin: 0; }
.report-content { max-width: 1400px; margin: 0 auto; padding: 20px; display: grid; grid-template-columns: 2fr 1fr; gap: 20px; }
.stats-grid { grid-column: 1 / -1; display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; }
.stat-card { background: #282828; border-radius: 16px; padding: 20px; text-align: center; }
.stat-number { font-size: 2em; font-weight: 700; color: #00ff88; }
.data-section { background: #282828; border-radius: 16px; padding: 20px; margin-bottom: 20px; }
.section-title { color: #00ff88; font-size: 1.2em; font-weight: 600; margin-bottom: 15px; border-bottom: 1px solid rgba(255,255,255,0.1); padding-bottom: 10px; }
.database-block { background: #323232; border-radius: 12px; padding: 15px; margin-bottom: 15px; }
.database-header { color: #00ff88; font-weight: 600; margin-bottom: 12px; }
.source-highlight { color: #ff6b6b; }
.data-line { margin: 6px 0; font-family: monospace; font-size: 0.85em; }
.key { color: #00ff88; }
.phone-operator { color: #00ff88; font-size: 0.8em; margin-left: 10px; }
.phone-region { color: #0088ff; font-size: 0.8em; margin-left: 5px; }
.no-data { color: rgba(255,255,255,0.5); font-style: italic; }
@media (max-width: 1024px) { .report-content { grid-template-columns: 1fr; } }
"#;

/// Renders the assembled summary into the fixed page template. Every value
/// in the summary has already been through the core sanitizer.
pub fn render_html(summary: &ReportSummary) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str(&format!("<title>OSINT Report - {}</title>\n", summary.query));
    page.push_str(&format!("<style>{PAGE_STYLE}</style>\n"));
    page.push_str("</head>\n<body>\n");

    page.push_str(&format!(
        "<div class=\"report-header\"><h1><span>{}</span> <span>{}</span></h1></div>\n",
        summary.icon, summary.title
    ));

    page.push_str("<div class=\"report-content\">\n<div class=\"stats-grid\">\n");
    for (label, count) in [
        ("📊 Всего записей", summary.record_count),
        ("👤 Имен", summary.name_count),
        ("📱 Телефонов", summary.phone_count),
        ("📨 Email", summary.email_count),
    ] {
        page.push_str(&format!(
            "<div class=\"stat-card\"><div>{label}</div><div class=\"stat-number\">{count}</div></div>\n"
        ));
    }
    page.push_str("</div>\n");

    page.push_str("<div class=\"left-column\">\n<div class=\"data-section\">\n");
    page.push_str("<div class=\"section-title\">📋 Основные данные</div>\n");
    if summary.blocks.is_empty() {
        page.push_str("<div class=\"no-data\">Данные не найдены</div>\n");
    }
    for block in &summary.blocks {
        render_block(&mut page, block);
    }
    page.push_str("</div>\n</div>\n");

    page.push_str("<div class=\"right-column\">\n");

    page.push_str("<div class=\"data-section\">\n<div class=\"section-title\">ℹ️ Информация</div>\n");
    page.push_str(&format!(
        "<div class=\"data-line\">• Запрос: {}</div>\n",
        summary.query
    ));
    page.push_str(&format!(
        "<div class=\"data-line\">• Найдено баз: {}</div>\n",
        summary.record_count
    ));
    page.push_str("</div>\n");

    page.push_str("<div class=\"data-section\">\n<div class=\"section-title\">📞 Телефоны</div>\n");
    if summary.phones.is_empty() {
        page.push_str("<div class=\"no-data\">Телефоны не найдены</div>\n");
    }
    for phone in &summary.phones {
        page.push_str(&format!(
            "<div class=\"data-line\">• {}<span class=\"phone-operator\">{}</span><span class=\"phone-region\">{}</span></div>\n",
            phone.number, phone.operator, phone.region
        ));
    }
    page.push_str("</div>\n");

    page.push_str("<div class=\"data-section\">\n<div class=\"section-title\">📧 Email адреса</div>\n");
    if summary.emails.is_empty() {
        page.push_str("<div class=\"no-data\">Email не найдены</div>\n");
    }
    for email in summary.emails.iter().take(MAX_EMAILS_SHOWN) {
        page.push_str(&format!("<div class=\"data-line\">• {email}</div>\n"));
    }
    page.push_str("</div>\n");

    page.push_str("</div>\n</div>\n</body>\n</html>\n");
    page
}

fn render_block(page: &mut String, block: &RecordBlock) {
    match block {
        RecordBlock::Structured { source, lines } => {
            page.push_str("<div class=\"database-block\">");
            page.push_str(&format!(
                "<div class=\"database-header\">📊 База: <span class=\"source-highlight\">{source}</span></div>"
            ));
            for (index, line) in lines.iter().enumerate() {
                let prefix = if index + 1 < lines.len() { "├" } else { "└" };
                page.push_str(&format!(
                    "<div class=\"data-line\">{prefix} <span class=\"key\">{}:</span> <span class=\"value\">{}</span></div>",
                    line.key, line.value
                ));
            }
            page.push_str("</div>\n");
        }
        RecordBlock::Raw { text } => {
            page.push_str("<div class=\"database-block\">");
            page.push_str("<div class=\"database-header\">📊 Raw данные</div>");
            page.push_str(&format!(
                "<div class=\"data-line\">└ <span class=\"value\">{text}</span></div>"
            ));
            page.push_str("</div>\n");
        }
    }
}
