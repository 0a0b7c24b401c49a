//! Turns raw coordinate text into populated [`MileageRecord`]s.
//!
//! Each record is a straight-line pipeline: parse both points, measure both
//! drives from the office, reduce to the furthest, optionally scale by the
//! tracker count, optionally annotate regions. A failure at any stage only
//! degrades the fields it owns.

use std::num::NonZeroU32;

use futures::stream::{self, StreamExt};

use crate::coords::parse_coordinates;
use crate::geo::GeoPoint;
use crate::mileage::{
    DistanceResult, Endpoint, MileageRecord, RecordInput, RecordIssue, UNKNOWN_REGION,
};
use crate::office::OfficeLocation;
use crate::provider::{RegionProvider, RoutingProvider};

/// Feature switches for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub region_lookup: bool,
    /// When set, every record also gets `furthest × tracker_count`.
    pub tracker_count: Option<NonZeroU32>,
    /// Rows in flight at once during batch runs. Output order is unaffected.
    pub max_concurrent_rows: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            region_lookup: false,
            tracker_count: None,
            max_concurrent_rows: 1,
        }
    }
}

/// Resolved state of one endpoint.
struct EndpointOutcome {
    point: Option<GeoPoint>,
    distance: DistanceResult,
    region: Option<String>,
}

pub struct MileageAggregator<P> {
    provider: P,
    office: OfficeLocation,
    options: PipelineOptions,
}

impl<P> MileageAggregator<P>
where
    P: RoutingProvider + RegionProvider,
{
    pub fn new(provider: P, office: OfficeLocation, options: PipelineOptions) -> Self {
        Self {
            provider,
            office,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Processes one record. Never fails; problems are listed in
    /// [`MileageRecord::issues`].
    pub async fn process(&self, input: RecordInput) -> MileageRecord {
        let mut issues = Vec::new();

        let launcher = self
            .resolve_endpoint(Endpoint::Launcher, &input.launcher, &mut issues)
            .await;
        let receiver = self
            .resolve_endpoint(Endpoint::Receiver, &input.receiver, &mut issues)
            .await;

        let furthest = launcher.distance.furthest(receiver.distance);
        let total_mileage = self.options.tracker_count.map(|n| furthest.scaled(n));

        if !issues.is_empty() {
            tracing::debug!(
                label = input.label.as_deref().unwrap_or(""),
                issues = issues.len(),
                "record partially resolved"
            );
        }

        MileageRecord {
            label: input.label,
            launcher_text: input.launcher,
            receiver_text: input.receiver,
            launcher: launcher.point,
            receiver: receiver.point,
            distance_to_launcher: launcher.distance,
            distance_to_receiver: receiver.distance,
            furthest,
            launcher_region: launcher.region,
            receiver_region: receiver.region,
            total_mileage,
            issues,
        }
    }

    /// Processes every row, returning one record per input in input order.
    ///
    /// Up to `max_concurrent_rows` rows are looked up at once. A row that
    /// fails never affects its siblings.
    pub async fn process_batch(&self, inputs: Vec<RecordInput>) -> Vec<MileageRecord> {
        let max_concurrent = self.options.max_concurrent_rows.max(1);
        let row_count = inputs.len();

        let records: Vec<MileageRecord> = stream::iter(inputs)
            .map(|input| self.process(input))
            .buffered(max_concurrent)
            .collect()
            .await;

        let unresolved = records.iter().filter(|r| !r.is_resolved()).count();
        if unresolved > 0 {
            tracing::warn!(unresolved, rows = row_count, "some rows were not fully resolved");
        }
        tracing::info!(rows = row_count, "batch complete");

        records
    }

    async fn resolve_endpoint(
        &self,
        endpoint: Endpoint,
        text: &str,
        issues: &mut Vec<RecordIssue>,
    ) -> EndpointOutcome {
        let point = match parse_coordinates(text) {
            Ok(point) => point,
            Err(error) => {
                issues.push(RecordIssue::Parse { endpoint, error });
                return EndpointOutcome {
                    point: None,
                    distance: DistanceResult::Unresolved,
                    region: self
                        .options
                        .region_lookup
                        .then(|| UNKNOWN_REGION.to_owned()),
                };
            }
        };

        let distance = self
            .provider
            .driving_distance_miles(self.office.point(), point)
            .await;
        if !distance.is_resolved() {
            issues.push(RecordIssue::RouteUnresolved { endpoint });
        }

        let region = if self.options.region_lookup {
            Some(self.provider.region_name(point).await)
        } else {
            None
        };

        EndpointOutcome {
            point: Some(point),
            distance,
            region,
        }
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
