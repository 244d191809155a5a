//! The conflict detector: one candidate scene against its peers.

use crate::personnel::{shared_resources, ResourceSet};
use crate::shoot_window::{windows_overlap, DurationPolicy};

use super::report::{ConflictEntry, ConflictReport, ConflictType, RankedEntry};
use super::snapshot::SceneSnapshot;

/// Stateless conflict detector parameterised by a [`DurationPolicy`].
///
/// Cheap to copy; build one per request from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictDetector {
    policy: DurationPolicy,
}

impl ConflictDetector {
    pub fn new(policy: DurationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DurationPolicy {
        &self.policy
    }

    /// Check `candidate` against `peers`.
    ///
    /// `peers` is expected to be the live scenes of the candidate's show; no
    /// show or company filtering happens here. A peer sharing the
    /// candidate's id is skipped. Each overlapping peer yields a `Time`
    /// entry, plus a `Resource` entry when the two scenes share people.
    pub fn detect(&self, candidate: &SceneSnapshot, peers: &[SceneSnapshot]) -> ConflictReport {
        let candidate_window = candidate.shoot_window(&self.policy);
        if candidate_window.is_none() {
            return ConflictReport::empty();
        }
        let candidate_resources = candidate.resource_set();

        let mut ranked = Vec::new();
        for peer in peers.iter().filter(|p| p.id != candidate.id) {
            let peer_window = peer.shoot_window(&self.policy);
            if !windows_overlap(candidate_window.as_ref(), peer_window.as_ref()) {
                continue;
            }
            let Some(peer_start) = peer_window.map(|w| w.start) else {
                continue;
            };

            ranked.push(RankedEntry {
                peer_start,
                entry: build_entry(candidate, peer, ConflictType::Time, None),
            });

            let shared = shared_resources(&candidate_resources, &peer.resource_set());
            if !shared.is_empty() {
                ranked.push(RankedEntry {
                    peer_start,
                    entry: build_entry(candidate, peer, ConflictType::Resource, Some(shared)),
                });
            }
        }

        ConflictReport::from_ranked(ranked)
    }
}

/// Detect conflicts with the default 60-minute nominal window.
pub fn detect_conflicts(candidate: &SceneSnapshot, peers: &[SceneSnapshot]) -> ConflictReport {
    ConflictDetector::default().detect(candidate, peers)
}

fn build_entry(
    candidate: &SceneSnapshot,
    peer: &SceneSnapshot,
    conflict_type: ConflictType,
    shared: Option<ResourceSet>,
) -> ConflictEntry {
    ConflictEntry {
        scene_id: candidate.id,
        scene_number: candidate.scene_number.clone(),
        scene_title: candidate.title.clone(),
        conflict_type,
        conflicting_scene_id: peer.id,
        conflicting_scene_number: peer.scene_number.clone(),
        conflicting_scene_title: peer.title.clone(),
        conflicting_resources: shared.map(ResourceSet::into_vec),
    }
}
