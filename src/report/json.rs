use crate::pipeline::stage5_detail::StationDetail;
use crate::report::SummaryData;

pub fn render_summary_json(data: &SummaryData) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

pub fn render_station_json(detail: &StationDetail) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(detail)?;
    out.push('\n');
    Ok(out)
}
