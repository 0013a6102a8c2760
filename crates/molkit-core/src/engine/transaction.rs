use super::config::BatchMode;
use super::error::MoleculeError;
use super::molecule::Molecule;
use tracing::debug;

impl Molecule {
    /// Runs a batch operation under the configured [`BatchMode`].
    ///
    /// The molecule must be open. In transactional mode the graph journals every atom the
    /// batch creates or changes and the branch count is remembered; if `action` fails the
    /// journal is replayed backwards and new branches are dropped. The id counter never
    /// moves back.
    pub(super) fn transaction<F>(
        &mut self,
        operation: &'static str,
        action: F,
    ) -> Result<&mut Self, MoleculeError>
    where
        F: FnOnce(&mut Self) -> Result<(), MoleculeError>,
    {
        self.ensure_open()?;

        let transactional = self.config.batch_mode == BatchMode::Transactional;
        let branch_count = self.branches.len();
        if transactional {
            self.graph.begin_journal();
        }

        match action(self) {
            Ok(()) => {
                self.graph.commit_journal();
                Ok(self)
            }
            Err(err) if transactional => {
                let undone = self.graph.rollback_journal();
                self.branches.truncate(branch_count);
                debug!(operation, undone, error = %err, "Batch failed; rolled back.");
                Err(err)
            }
            Err(err) => {
                debug!(operation, error = %err, "Batch failed; earlier entries remain applied.");
                Err(err)
            }
        }
    }
}
