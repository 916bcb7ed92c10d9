use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::pipeline::Analysis;
use crate::pipeline::stage5_detail::build_station_detail;
use crate::report::json::render_summary_json;
use crate::report::text::render_summary_text;
use crate::report::{
    InputsMeta, SummaryData, ToolMeta, UnmappedName, format_figure, format_rank, join_names,
    top_nonzero,
};

pub const STATIONS_FILE: &str = "stations.tsv";
pub const DETAIL_FILE: &str = "station_detail.tsv";
pub const RESOLUTION_FILE: &str = "name_resolution.tsv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";

pub fn write_reports(analysis: &Analysis, out_dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(out_dir)?;

    write_stations_tsv(analysis, &out_dir.join(STATIONS_FILE))?;
    write_detail_tsv(analysis, &out_dir.join(DETAIL_FILE))?;
    write_resolution_tsv(analysis, &out_dir.join(RESOLUTION_FILE))?;

    let summary = build_summary(analysis);
    write_text(&out_dir.join(SUMMARY_FILE), &render_summary_json(&summary)?)?;
    write_text(&out_dir.join(REPORT_FILE), &render_summary_text(&summary))?;

    tracing::info!("reports written to {}", out_dir.display());
    Ok(())
}

pub fn build_summary(analysis: &Analysis) -> SummaryData {
    let profile = &analysis.profile;
    let dataset = &analysis.dataset;
    let ranking = &analysis.ranking;

    SummaryData {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        inputs: InputsMeta {
            results: analysis.paths.results.display().to_string(),
            polls: analysis.paths.polls.display().to_string(),
            aliases: analysis
                .paths
                .aliases
                .as_ref()
                .map(|p| p.display().to_string()),
            poll_layout: format!("{:?}", analysis.poll_layout).to_ascii_lowercase(),
            builtin_aliases: analysis.paths.builtin_aliases,
        },
        profile: profile.clone(),
        flags: ranking.flags.clone(),

        n_candidates: dataset.candidates.len(),
        n_winners: dataset.actual.winners().len(),
        n_stations: ranking.stats.n_stations,
        winners: dataset
            .actual
            .winner_ids()
            .into_iter()
            .map(str::to_string)
            .collect(),

        mean_accuracy_pct: ranking.stats.mean_accuracy_pct,
        stations: ranking.ranked.clone(),
        most_accurate: ranking.stats.most_accurate.clone(),
        least_accurate: ranking.stats.least_accurate.clone(),

        most_missed: top_nonzero(&ranking.missed, profile.highlight),
        most_falsely_predicted: top_nonzero(&ranking.falsely_predicted, profile.highlight),

        unmapped_names: dataset
            .unmapped()
            .map(|r| UnmappedName {
                source: r.source.as_str().to_string(),
                raw: r.raw.clone(),
            })
            .collect(),
    }
}

fn write_stations_tsv(analysis: &Analysis, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "position",
        "station",
        "correct",
        "predicted",
        "denominator",
        "accuracy_pct",
        "correct_candidates",
        "missed",
        "falsely_predicted",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for ranked in &analysis.ranking.ranked {
        let Some(result) = analysis.result_for(&ranked.station) else {
            continue;
        };
        let row = [
            ranked.position.to_string(),
            ranked.station.clone(),
            result.correct_count.to_string(),
            result.predicted_count.to_string(),
            result.denominator.to_string(),
            analysis.profile.format_pct(result.accuracy_pct),
            join_names(&result.correct),
            join_names(&result.missed),
            join_names(&result.falsely_predicted),
        ];
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_detail_tsv(analysis: &Analysis, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "{}",
        [
            "station",
            "side",
            "position",
            "candidate",
            "status",
            "counterpart_rank",
            "percentage",
        ]
        .join("\t")
    )?;

    for (record, result) in analysis.dataset.polls.iter().zip(&analysis.results) {
        let detail = build_station_detail(record, &analysis.dataset.actual, result, &analysis.profile);
        for row in &detail.predicted {
            let fields = [
                detail.station.clone(),
                "predicted".to_string(),
                row.position.to_string(),
                row.candidate.clone(),
                row.status.as_str().to_string(),
                format_rank(row.actual_rank),
                row.percentage.map(format_figure).unwrap_or_default(),
            ];
            writeln!(w, "{}", fields.join("\t"))?;
        }
        for row in &detail.actual {
            let fields = [
                detail.station.clone(),
                "actual".to_string(),
                row.position.to_string(),
                row.candidate.clone(),
                row.status.as_str().to_string(),
                format_rank(row.predicted_rank),
                record
                    .percentage_of(&row.candidate)
                    .map(format_figure)
                    .unwrap_or_default(),
            ];
            writeln!(w, "{}", fields.join("\t"))?;
        }
    }
    w.flush()
}

fn write_resolution_tsv(analysis: &Analysis, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "source\traw\tcanonical\tresolution")?;
    for r in &analysis.dataset.resolutions {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            r.source.as_str(),
            r.raw,
            r.id,
            r.via
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
