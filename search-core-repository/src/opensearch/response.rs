//! Parsing of OpenSearch search and bulk responses.

use serde_json::Value;

use super::IndexConfig;
use crate::errors::SinkError;
use crate::types::{BatchOperationResult, BatchOperationSummary};
use search_core_shared::{
    value_as_string, FacetBucket, FacetResult, ResultItem, SearchResponse,
};

/// Parse a search response body.
///
/// Facets are read in the order of `facet_ids`, which is the order they
/// were requested in.
pub(crate) fn parse_search_response(
    body: &Value,
    facet_ids: &[String],
    index_config: &IndexConfig,
) -> Result<SearchResponse, SinkError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| SinkError::parse("response has no hits"))?;

    // `hits.total` is an object on current engines and a plain number on old ones
    let total = match hits.get("total") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(total) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
        None => 0,
    };

    let items = hits
        .get("hits")
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| parse_hit(hit, index_config))
                .collect()
        })
        .unwrap_or_default();

    let facets = facet_ids
        .iter()
        .map(|identifier| parse_facet(body, identifier))
        .collect();

    Ok(SearchResponse {
        total,
        items,
        facets,
    })
}

/// Parse a single hit. Hits without an id or source are skipped.
pub(crate) fn parse_hit(hit: &Value, index_config: &IndexConfig) -> Option<ResultItem> {
    let identifier = hit.get("_id").and_then(value_as_string)?;
    let data = hit.get("_source").and_then(Value::as_object)?.clone();
    let index = hit.get("_index").and_then(Value::as_str).unwrap_or_default();
    let entity_type = index_config
        .entity_type_for_index(index)
        .unwrap_or(index)
        .to_string();
    let score = hit.get("_score").and_then(Value::as_f64).unwrap_or(0.0);

    Some(ResultItem {
        entity_type,
        identifier,
        score,
        data,
    })
}

fn parse_facet(body: &Value, identifier: &str) -> FacetResult {
    let buckets = body
        .get("aggregations")
        .and_then(|aggs| aggs.get(identifier))
        .and_then(|agg| agg.get("buckets"))
        .and_then(Value::as_array)
        .map(|buckets| {
            buckets
                .iter()
                .filter_map(|bucket| {
                    Some(FacetBucket {
                        key: bucket.get("key").and_then(value_as_string)?,
                        count: bucket.get("doc_count").and_then(Value::as_u64).unwrap_or(0),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    FacetResult {
        identifier: identifier.to_string(),
        buckets,
    }
}

/// Turn a bulk response into a per-document summary.
pub(crate) fn parse_bulk_response(body: &Value) -> BatchOperationSummary {
    let results = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("index"))
                .map(|index| {
                    let identifier = index
                        .get("_id")
                        .and_then(value_as_string)
                        .unwrap_or_default();
                    let error = index.get("error").map(|error| {
                        let reason = error
                            .get("reason")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string());
                        SinkError::index(reason)
                    });
                    BatchOperationResult {
                        identifier,
                        success: error.is_none(),
                        error,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    BatchOperationSummary::from_results(results)
}
