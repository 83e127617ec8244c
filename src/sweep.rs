use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{error, info};

use crate::catalog::{CatalogClient, MediaEntity};
use crate::confirm::{self, ConfirmState, Prompter};
use crate::config::AppConfig;
use crate::error::Error;
use crate::policy;

#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Log approved deletions instead of issuing them.
    pub dry_run: bool,
    pub page_size: u32,
    /// Pause after every executed deletion.
    pub delete_wait: Duration,
}

impl SweepOptions {
    pub fn from_config(config: &AppConfig, dry_run: bool) -> Self {
        Self {
            dry_run,
            page_size: config.page_size,
            delete_wait: config.delete_wait(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SweepOutcome {
    #[default]
    Completed,
    /// A page failed; later pages were not fetched.
    Halted { page_index: u32, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub pages_fetched: u32,
    pub entities_checked: usize,
    /// Entities with at most one flavor.
    pub entities_skipped: usize,
    pub candidates: usize,
    pub declined: usize,
    pub deleted: usize,
    /// Approved but not deleted because of dry run.
    pub simulated: usize,
    pub approved_all: bool,
    pub duration: Duration,
    pub outcome: SweepOutcome,
}

impl SweepReport {
    pub fn is_halted(&self) -> bool {
        matches!(self.outcome, SweepOutcome::Halted { .. })
    }
}

/// Inclusive-exclusive range of catalog positions covered by a page, for
/// progress output. Clamped to the reported total.
pub fn page_range(page_index: u32, page_size: u32, total_count: u64) -> (u64, u64) {
    let start = page_index as u64 * page_size as u64;
    let end = (start + page_size as u64).min(total_count).max(start);
    (start, end)
}

pub struct SweepEngine<C, P> {
    client: C,
    prompter: P,
    options: SweepOptions,
}

impl<C: CatalogClient, P: Prompter> SweepEngine<C, P> {
    pub fn new(client: C, prompter: P, options: SweepOptions) -> Self {
        Self {
            client,
            prompter,
            options,
        }
    }

    /// Walk every page, newest media first, until a short page or a failure.
    /// A zero page size halts before any request is made.
    pub async fn run(&mut self) -> SweepReport {
        let started = Instant::now();
        let mut report = SweepReport::default();
        let mut state = ConfirmState::Prompting;
        let mut page_index: u32 = 0;

        if self.options.page_size == 0 {
            error!("Page size must be at least 1");
            report.outcome = SweepOutcome::Halted {
                page_index,
                reason: "page size must be at least 1".to_string(),
            };
            report.duration = started.elapsed();
            return report;
        }

        if self.options.dry_run {
            info!("Dry run: no flavor assets will be deleted (pass --confirm to delete)");
        }

        loop {
            match self.sweep_page(page_index, &mut state, &mut report).await {
                Ok(count) if count == self.options.page_size as usize => {
                    page_index += 1;
                    info!("Checking for more media entities, page {}", page_index);
                }
                Ok(_) => break,
                Err(err) => {
                    error!("Page {} failed: {}", page_index, err);
                    error!("Failed to remove all source flavor assets");
                    report.outcome = SweepOutcome::Halted {
                        page_index,
                        reason: err.to_string(),
                    };
                    break;
                }
            }
        }

        report.approved_all = state == ConfirmState::ApprovedAll;
        report.duration = started.elapsed();
        report
    }

    /// Process one page and return how many entities it held.
    async fn sweep_page(
        &mut self,
        page_index: u32,
        state: &mut ConfirmState,
        report: &mut SweepReport,
    ) -> Result<usize, Error> {
        let page = self
            .client
            .list_entities(page_index, self.options.page_size)
            .await?;
        report.pages_fetched += 1;

        let (start, end) = page_range(page_index, self.options.page_size, page.total_count);
        info!(
            "Cleaning up assets for media entities {} through {} out of {}",
            start, end, page.total_count
        );
        info!("Checking {} media entities for source flavors", page.entities.len());

        for entity in &page.entities {
            report.entities_checked += 1;
            self.sweep_entity(entity, state, report).await?;
        }

        Ok(page.entities.len())
    }

    async fn sweep_entity(
        &mut self,
        entity: &MediaEntity,
        state: &mut ConfirmState,
        report: &mut SweepReport,
    ) -> Result<(), Error> {
        info!("Accessing media entity {} flavors", entity.id);
        let flavors = self.client.list_variants(&entity.id).await?;

        if !policy::has_redundant_variants(&flavors) {
            info!(
                "Skipping entity {} with {} flavor asset(s)",
                entity.id,
                flavors.len()
            );
            report.entities_skipped += 1;
            return Ok(());
        }

        for flavor in flavors.iter().filter(|f| policy::is_deletion_candidate(f)) {
            report.candidates += 1;

            *state = confirm::confirm(*state, &mut self.prompter, entity, flavor).await?;
            if !state.approves() {
                info!("Skipping flavor asset {} for entity {}", flavor.id, entity.id);
                report.declined += 1;
                continue;
            }

            if self.options.dry_run {
                info!("Dry run, not deleting {}", flavor.id);
                report.simulated += 1;
                continue;
            }

            info!("Deleting entity {} flavor asset {}", entity.id, flavor.id);
            self.client.delete_variant(&flavor.id).await?;
            report.deleted += 1;

            info!(
                "Waiting {}ms before deleting the next flavor asset",
                self.options.delete_wait.as_millis()
            );
            sleep(self.options.delete_wait).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(0, 50, 120), (0, 50));
        assert_eq!(page_range(1, 50, 120), (50, 100));
        assert_eq!(page_range(2, 50, 120), (100, 120));
        // Total shrank between fetches.
        assert_eq!(page_range(3, 50, 120), (150, 150));
    }
}
