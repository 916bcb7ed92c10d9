use crate::model::profile::ScoringProfile;
use crate::pipeline::stage4_rank::{FrequencyEntry, RankedStation};
use crate::pipeline::stage5_detail::StationDetail;
use crate::report::{SummaryData, flags_label, format_opt_pct, profile_pct};

pub fn render_summary_text(data: &SummaryData) -> String {
    let profile = &data.profile;
    let mut out = String::new();

    out.push_str("Opinion Polling Accuracy Report\n");
    out.push_str("===============================\n\n");

    out.push_str("1. Inputs\n");
    out.push_str(&format!(
        "Actual results: {} ({} of {} winners)\n",
        data.inputs.results, data.n_winners, profile.top_n
    ));
    out.push_str(&format!(
        "Opinion polls: {} ({} stations, {} layout)\n",
        data.inputs.polls, data.n_stations, data.inputs.poll_layout
    ));
    if let Some(aliases) = &data.inputs.aliases {
        out.push_str(&format!("Alias table: {}\n", aliases));
    }
    out.push_str(&format!("Denominator policy: {}\n", profile.denominator));
    out.push_str(&format!("Flags: {}\n\n", flags_label(&data.flags)));

    out.push_str(&format!("2. Stations ranked by accuracy (top {})\n", profile.top_n));
    let width = data
        .stations
        .iter()
        .map(|s| s.station.chars().count())
        .max()
        .unwrap_or(0);
    for s in &data.stations {
        out.push_str(&format!(
            "{:>3}. {:<width$}  {:>2}/{:<2}  {:>6}\n",
            s.position,
            s.station,
            s.correct_count,
            s.denominator,
            profile_pct(profile, s.accuracy_pct),
            width = width
        ));
    }
    out.push('\n');

    out.push_str("3. Most accurate\n");
    push_podium(&mut out, &data.most_accurate, profile);
    out.push('\n');

    out.push_str("4. Least accurate\n");
    push_podium(&mut out, &data.least_accurate, profile);
    out.push('\n');

    out.push_str(&format!(
        "5. Overall average accuracy: {:.2}%\n\n",
        data.mean_accuracy_pct
    ));

    out.push_str(&format!(
        "6. Actual top {} most commonly missed\n",
        profile.top_n
    ));
    push_frequency(&mut out, &data.most_missed, "missed");
    out.push('\n');

    out.push_str(&format!(
        "7. Outside the actual top {} but most commonly included\n",
        profile.top_n
    ));
    push_frequency(&mut out, &data.most_falsely_predicted, "included");

    if !data.unmapped_names.is_empty() {
        out.push('\n');
        out.push_str("8. Unmapped names\n");
        for name in &data.unmapped_names {
            out.push_str(&format!("- {} ({})\n", name.raw, name.source));
        }
    }

    out
}

fn push_podium(out: &mut String, stations: &[RankedStation], profile: &ScoringProfile) {
    if stations.is_empty() {
        out.push_str("(no stations)\n");
    }
    for (i, s) in stations.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}: {} correct ({})\n",
            i + 1,
            s.station,
            s.correct_count,
            profile_pct(profile, s.accuracy_pct)
        ));
    }
}

fn push_frequency(out: &mut String, entries: &[FrequencyEntry], verb: &str) {
    if entries.is_empty() {
        out.push_str("(none)\n");
    }
    for e in entries {
        let noun = if e.count == 1 { "station" } else { "stations" };
        out.push_str(&format!(
            "- {}: {} by {} {} ({:.1}%)\n",
            e.candidate, verb, e.count, noun, e.share_pct
        ));
    }
}

pub fn render_station_text(detail: &StationDetail, profile: &ScoringProfile) -> String {
    let mut out = String::new();
    let acc = &detail.accuracy;

    out.push_str(&format!("Opinion Polling: {}\n", detail.station));
    out.push_str(&format!(
        "Correct predictions: {} out of {} ({})\n\n",
        acc.correct_count,
        acc.denominator,
        profile_pct(profile, acc.accuracy_pct)
    ));

    out.push_str(&format!("Predicted top {}\n", detail.top_n));
    if detail.predicted.is_empty() {
        out.push_str("(no predictions)\n");
    }
    for row in &detail.predicted {
        let rank = match row.actual_rank {
            Some(r) => r.to_string(),
            None => format!("not in top {}", detail.top_n),
        };
        out.push_str(&format!(
            "{:>2}. {} {} (actual rank: {})\n",
            row.position,
            row.candidate,
            row.status.marker(),
            rank
        ));
    }
    out.push('\n');

    out.push_str(&format!("Actual top {}\n", detail.top_n));
    for row in &detail.actual {
        let rank = match row.predicted_rank {
            Some(r) => r.to_string(),
            None => format!("not in predicted top {}", detail.top_n),
        };
        out.push_str(&format!(
            "{:>2}. {} {} (predicted rank: {})\n",
            row.position,
            row.candidate,
            row.status.marker(),
            rank
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "Poll percentages (top {} of {})\n",
        detail.standings.len(),
        detail.station
    ));
    for row in &detail.standings {
        let mark = if row.in_actual_top { "+" } else { "-" };
        out.push_str(&format!(
            "{:>2}. {} {} {}\n",
            row.position,
            mark,
            row.candidate,
            format_opt_pct(row.percentage)
        ));
    }

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
