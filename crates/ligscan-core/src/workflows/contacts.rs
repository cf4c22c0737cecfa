use crate::core::models::ids::ModelId;
use crate::core::models::system::MolecularSystem;
use crate::engine::classifier::{self, DataQualityIssue, NotFoundCondition};
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::{self, Report};
use crate::engine::spatial::SpatialIndex;
use crate::engine::tasks;
use std::collections::HashMap;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a contact analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactAnalysis {
    /// One report per ligand instance, in discovery order.
    pub reports: Vec<Report>,
    /// Set when the analysis ended early without reports.
    pub condition: Option<NotFoundCondition>,
    /// Residues that were skipped because of unusable coordinates.
    pub data_issues: Vec<DataQualityIssue>,
}

impl ContactAnalysis {
    pub fn total_contacts(&self) -> usize {
        self.reports.iter().map(|r| r.contacts.len()).sum()
    }
}

/// Runs the complete ligand contact analysis on `system`.
///
/// A missing ligand or an absent polymer is not an error: the returned analysis
/// carries the corresponding [`NotFoundCondition`] and no reports.
#[instrument(skip_all, name = "contacts_workflow")]
pub fn run(
    system: &MolecularSystem,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ContactAnalysis, EngineError> {
    config.validate()?;

    // === Phase 1: Classification ===
    reporter.report(Progress::PhaseStart {
        name: "Classification",
    });
    info!(
        ligand = %config.ligand_name,
        cutoff = config.cutoff,
        "Classifying residues."
    );
    let classification = classifier::classify(system, config);
    reporter.report(Progress::PhaseFinish);

    if let Some(condition) = classification.condition(config) {
        info!("{}", condition);
        reporter.message(condition.to_string());
        return Ok(ContactAnalysis {
            reports: Vec::new(),
            condition: Some(condition),
            data_issues: classification.data_issues,
        });
    }

    // === Phase 2: Spatial indexing ===
    reporter.report(Progress::PhaseStart {
        name: "Spatial Indexing",
    });
    let mut indices: HashMap<ModelId, SpatialIndex> = HashMap::new();
    for group in &classification.candidates {
        indices.insert(group.model_id, SpatialIndex::build(&group.atoms)?);
    }
    info!(
        models = indices.len(),
        candidates = classification.candidate_count(),
        "Spatial indices built."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Contact detection ===
    reporter.report(Progress::PhaseStart {
        name: "Contact Detection",
    });
    reporter.report(Progress::TaskStart {
        total_steps: classification.ligands.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = classification.ligands.iter();

    #[cfg(feature = "parallel")]
    let iterator = classification.ligands.par_iter();

    let reports = iterator
        .map(|ligand| -> Result<Report, EngineError> {
            let index = indices.get(&ligand.model_id).ok_or_else(|| {
                EngineError::Internal(format!(
                    "No spatial index for the model of ligand {}",
                    ligand.label
                ))
            })?;
            let distances = tasks::contact_detection::run(system, index, ligand, config);
            let report = report::aggregate(ligand.label.clone(), config.cutoff, distances);
            reporter.report(Progress::TaskIncrement);
            Ok(report)
        })
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let analysis = ContactAnalysis {
        reports,
        condition: None,
        data_issues: classification.data_issues,
    };
    info!(
        ligands = analysis.reports.len(),
        contacts = analysis.total_contacts(),
        "Contact analysis complete."
    );
    Ok(analysis)
}
