use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use traineval_chart::ChartRenderer;
use traineval_core::models::scores::ScoreSeries;
use traineval_export::delivery::{
    StagedFile, resolve_destination, resolve_summary_destination, stage,
};
use traineval_export::layout::{ReportContent, ResponseSection, assemble};
use traineval_export::paginate::page_count;
use traineval_export::pdf::render_pdf;
use traineval_export::template::TemplateText;
use traineval_scoring::{aggregate_scores, collect_responses};
use traineval_sheet::loader::load_table;

use crate::config::{ReportConfig, load_config};
use crate::error::PipelineError;

/// Response count and chunk count of one open-text question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub question_id: String,
    pub responses: usize,
    pub chunks: usize,
}

/// What went into a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub scores: ScoreSeries,
    pub sections: Vec<SectionSummary>,
    pub total_pages: usize,
}

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub pdf: Vec<u8>,
    pub summary: ReportSummary,
}

/// Build the report PDF from in-memory inputs.
///
/// Stages run in order (load, aggregate, render, assemble, serialise) and
/// the first failure aborts the run.
pub fn generate_report(
    config: &ReportConfig,
    renderer: &ChartRenderer,
    spreadsheet: &[u8],
    template: Option<&[u8]>,
) -> Result<GeneratedReport, PipelineError> {
    let table = load_table(spreadsheet, &config.sheet_name)?;
    let resolved = config.questions.resolve(&table)?;
    if !resolved.unmatched_ratings.is_empty() {
        warn!(
            questions = %resolved.unmatched_ratings.join(", "),
            "rating questions without a matching column"
        );
    }
    let template = template
        .map(TemplateText::from_pdf_bytes)
        .transpose()
        .map_err(PipelineError::Template)?;
    info!(
        rows = table.row_count(),
        rating_columns = resolved.ratings.len(),
        template_pages = template.as_ref().map_or(0, TemplateText::len),
        "inputs loaded"
    );

    let scores = aggregate_scores(&table, &resolved.ratings, &config.aggregation);
    let sections: Vec<ResponseSection> = resolved
        .open_text
        .iter()
        .map(|column| ResponseSection {
            question_id: column.question_id.clone(),
            responses: collect_responses(&table, column),
        })
        .collect();
    info!(scored = scores.len(), "scores aggregated");

    let chart = renderer.render(&scores)?;

    let content = ReportContent {
        title: config.title.clone(),
        chart_px: (chart.width_px, chart.height_px),
        sections,
    };
    let layout = assemble(
        &content,
        &config.styles,
        &config.layout_options(),
        template.as_ref(),
    )
    .map_err(PipelineError::Assemble)?;

    let pdf = render_pdf(&layout, &chart.png, &config.document_title)
        .map_err(PipelineError::Write)?;

    let summary = ReportSummary {
        scores,
        sections: content
            .sections
            .iter()
            .map(|s| SectionSummary {
                question_id: s.question_id.clone(),
                responses: s.responses.len(),
                chunks: page_count(s.responses.len(), config.page_capacity),
            })
            .collect(),
        total_pages: layout.page_count(),
    };
    info!(pages = summary.total_pages, bytes = pdf.len(), "report generated");

    Ok(GeneratedReport { pdf, summary })
}

/// Paths of one command-line run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub template: Option<PathBuf>,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub summary: ReportSummary,
}

/// Read the inputs from disk, generate the report, and write it out.
///
/// Nothing is written unless every stage succeeded. The report and the
/// summary are both staged before either is moved into place.
pub fn run(options: &RunOptions) -> Result<RunOutcome, PipelineError> {
    let config = match &options.config {
        Some(path) => load_config(path)?,
        None => ReportConfig::default(),
    };

    let report_path = resolve_destination(&options.output);
    let summary_path = options
        .summary
        .as_deref()
        .map(resolve_summary_destination);
    if let Some(path) = summary_path
        .as_deref()
        .filter(|path| same_file(path, &report_path))
    {
        return Err(PipelineError::OutputConflict {
            path: path.display().to_string(),
        });
    }

    let spreadsheet = read_input(&options.input)?;
    let template = options.template.as_deref().map(read_input).transpose()?;

    let renderer = ChartRenderer::new(config.chart.clone());
    let report = generate_report(&config, &renderer, &spreadsheet, template.as_deref())?;

    let summary_json = summary_path
        .as_ref()
        .map(|_| serde_json::to_vec_pretty(&report.summary))
        .transpose()
        .map_err(PipelineError::Summary)?;

    let staged_report =
        stage(&report.pdf, &report_path, ".pdf.tmp").map_err(PipelineError::Write)?;
    let staged_summary = match (&summary_path, &summary_json) {
        (Some(path), Some(json)) => {
            Some(stage(json, path, ".json.tmp").map_err(PipelineError::Write)?)
        }
        _ => None,
    };

    let (report_path, summary_path) = commit_all(staged_report, staged_summary)?;

    Ok(RunOutcome {
        report_path,
        summary_path,
        summary: report.summary,
    })
}

/// Move the staged report and summary into place. If the summary cannot be
/// committed, the freshly written report is removed again.
fn commit_all(
    report: StagedFile,
    summary: Option<StagedFile>,
) -> Result<(PathBuf, Option<PathBuf>), PipelineError> {
    let report_path = report.commit().map_err(PipelineError::Write)?;
    let Some(summary) = summary else {
        return Ok((report_path, None));
    };

    match summary.commit() {
        Ok(summary_path) => Ok((report_path, Some(summary_path))),
        Err(e) => {
            if let Err(remove) = std::fs::remove_file(&report_path) {
                warn!(
                    path = %report_path.display(),
                    error = %remove,
                    "could not remove report after failed summary write"
                );
            }
            Err(PipelineError::Write(e))
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, PipelineError> {
    std::fs::read(path).map_err(|source| PipelineError::Input {
        path: path.display().to_string(),
        source,
    })
}
