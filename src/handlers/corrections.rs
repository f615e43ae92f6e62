use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::{json, ApiErr, ApiResp, Ctx, Result};
use crate::corrector::{self, Correction, Summary};

/// Correction query params.
#[derive(Debug, Deserialize, Default)]
pub struct CorrectionsQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
}

/// A single corrected segment of the query.
#[derive(Debug, Serialize, PartialEq)]
pub struct Segment {
    pub original: String,
    pub text: String,
    pub distance: usize,
    pub score: f64,
    pub found: bool,
}

impl From<Correction> for Segment {
    fn from(c: Correction) -> Self {
        Self {
            original: c.original,
            text: c.text,
            distance: c.distance,
            score: c.score,
            found: c.found,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CorrectionsResp {
    /// Corrected segments joined with ", ".
    pub text: String,
    pub distance: usize,
    pub score: f64,
    /// Time taken in milliseconds.
    pub took: u64,
    pub corrections: Vec<Segment>,
}

impl CorrectionsResp {
    pub fn new(segments: Vec<Correction>, took: u64) -> Self {
        let Summary {
            text,
            distance,
            score,
        } = Summary::of(&segments);

        Self {
            text,
            distance,
            score,
            took,
            corrections: segments.into_iter().map(Segment::from).collect(),
        }
    }
}

/// Correct a query against the dictionary of the given language.
pub async fn get_corrections(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<CorrectionsQuery>,
) -> Result<ApiResp<CorrectionsResp>> {
    if query.text.is_empty() {
        return Err(ApiErr::new("No text given", StatusCode::UNPROCESSABLE_ENTITY));
    }
    if query.language.is_empty() {
        return Err(ApiErr::new(
            "No language given",
            StatusCode::UNPROCESSABLE_ENTITY,
        ));
    }

    let start = Instant::now();
    let segments = corrector::correct(
        &ctx.tries,
        &query.text,
        &query.language,
        &ctx.allowed_distances,
        ctx.max_lookahead,
    );
    let took = start.elapsed().as_millis() as u64;

    let resp = CorrectionsResp::new(segments, took);
    log::debug!(
        "corrected '{}' ({}) -> '{}' in {}ms",
        query.text,
        query.language,
        resp.text,
        took
    );

    Ok(json(resp))
}
