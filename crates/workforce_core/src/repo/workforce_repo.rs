//! Person-keyed read model over the loaded tables.
//!
//! # Invariants
//! - Per-person rows keep their source order.
//! - `people_with_awards` is sorted ascending, which makes every derived
//!   table deterministic.

use crate::model::record::{
    Award, Demographic, MobilityEdge, OrgId, Organization, PersonId, RankedJob,
};
use crate::repo::dataset::Dataset;
use std::collections::BTreeMap;

/// Read-only lookups used by the timeline, figure and mobility services.
pub trait WorkforceRepository {
    /// Ids of every person with at least one award, ascending.
    fn people_with_awards(&self) -> Vec<PersonId>;
    fn jobs_for(&self, person_id: PersonId) -> &[RankedJob];
    fn awards_for(&self, person_id: PersonId) -> &[Award];
    fn organization(&self, org_id: OrgId) -> Option<&Organization>;
    fn demographic(&self, person_id: PersonId) -> Option<&Demographic>;
    fn mobility_edges(&self) -> &[MobilityEdge];
}

impl<R: WorkforceRepository + ?Sized> WorkforceRepository for &R {
    fn people_with_awards(&self) -> Vec<PersonId> {
        (**self).people_with_awards()
    }

    fn jobs_for(&self, person_id: PersonId) -> &[RankedJob] {
        (**self).jobs_for(person_id)
    }

    fn awards_for(&self, person_id: PersonId) -> &[Award] {
        (**self).awards_for(person_id)
    }

    fn organization(&self, org_id: OrgId) -> Option<&Organization> {
        (**self).organization(org_id)
    }

    fn demographic(&self, person_id: PersonId) -> Option<&Demographic> {
        (**self).demographic(person_id)
    }

    fn mobility_edges(&self) -> &[MobilityEdge] {
        (**self).mobility_edges()
    }
}

/// In-memory repository indexed by person id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkforceRepository {
    jobs: BTreeMap<PersonId, Vec<RankedJob>>,
    awards: BTreeMap<PersonId, Vec<Award>>,
    organizations: BTreeMap<OrgId, Organization>,
    demographics: BTreeMap<PersonId, Demographic>,
    mobility_edges: Vec<MobilityEdge>,
}

impl InMemoryWorkforceRepository {
    pub fn new(
        jobs: Vec<RankedJob>,
        awards: Vec<Award>,
        organizations: Vec<Organization>,
        demographics: Vec<Demographic>,
    ) -> Self {
        let mut jobs_by_person = BTreeMap::<PersonId, Vec<RankedJob>>::new();
        for job in jobs {
            jobs_by_person.entry(job.person_id).or_default().push(job);
        }

        let mut awards_by_person = BTreeMap::<PersonId, Vec<Award>>::new();
        for award in awards {
            awards_by_person
                .entry(award.person_id)
                .or_default()
                .push(award);
        }

        Self {
            jobs: jobs_by_person,
            awards: awards_by_person,
            organizations: organizations
                .into_iter()
                .map(|org| (org.org_id, org))
                .collect(),
            demographics: demographics
                .into_iter()
                .map(|demographic| (demographic.person_id, demographic))
                .collect(),
            mobility_edges: Vec::new(),
        }
    }

    /// Builds a repository from a loaded dataset and its normalized jobs.
    ///
    /// The dataset's raw jobs are ignored; `ranked_jobs` is the output of
    /// the normalization pass for the active ruleset.
    pub fn from_dataset(dataset: &Dataset, ranked_jobs: Vec<RankedJob>) -> Self {
        Self::new(
            ranked_jobs,
            dataset.awards.clone(),
            dataset.organizations.clone(),
            dataset.demographics.clone(),
        )
        .with_mobility_edges(dataset.mobility_edges.clone())
    }

    pub fn with_mobility_edges(mut self, edges: Vec<MobilityEdge>) -> Self {
        self.mobility_edges = edges;
        self
    }
}

impl WorkforceRepository for InMemoryWorkforceRepository {
    fn people_with_awards(&self) -> Vec<PersonId> {
        self.awards
            .iter()
            .filter(|(_, awards)| !awards.is_empty())
            .map(|(person_id, _)| *person_id)
            .collect()
    }

    fn jobs_for(&self, person_id: PersonId) -> &[RankedJob] {
        self.jobs
            .get(&person_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn awards_for(&self, person_id: PersonId) -> &[Award] {
        self.awards
            .get(&person_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn organization(&self, org_id: OrgId) -> Option<&Organization> {
        self.organizations.get(&org_id)
    }

    fn demographic(&self, person_id: PersonId) -> Option<&Demographic> {
        self.demographics.get(&person_id)
    }

    fn mobility_edges(&self) -> &[MobilityEdge] {
        &self.mobility_edges
    }
}
