//! Application state for one signed-in session.
//!
//! Holds the company list, the selected company and its cached records and
//! targets. Commands go through [`BusinessDataService`] and apply the lists
//! it returns. Each load carries a [`LoadTicket`]; a result whose ticket no
//! longer matches the selection is dropped instead of overwriting newer
//! state.


use std::sync::Arc;

use bizpulse_shared::types::{CompanyId, MonthlyRecordId};
use tracing::debug;

use crate::alerts::{self, Alert};
use crate::company::{Company, CompanyInput};
use crate::dashboard::{self, Dashboard};
use crate::error::BusinessResult;
use crate::identity::IdentityProvider;
use crate::metrics::Advisory;
use crate::records::{MonthlyEntryInput, MonthlyRecord, MonthlyRecordPatch};
use crate::service::BusinessDataService;
use crate::store::RecordStore;
use crate::targets::{Target, TargetInput};

/// Identifies the selection a load was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    company_id: CompanyId,
    epoch: u64,
}

impl LoadTicket {
    /// Company being loaded.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }
}

/// Records and targets fetched for a ticket.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Selection the data was fetched for.
    pub ticket: LoadTicket,
    /// Records, oldest period first.
    pub records: Vec<MonthlyRecord>,
    /// Targets, latest year first.
    pub targets: Vec<Target>,
}

/// Cached session state.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    /// The user's companies, newest first.
    pub companies: Vec<Company>,
    /// Selected company.
    pub selected: Option<CompanyId>,
    /// Records of the selected company.
    pub records: Vec<MonthlyRecord>,
    /// Targets of the selected company.
    pub targets: Vec<Target>,
    epoch: u64,
}

/// Session state plus the commands that change it.
pub struct Workspace<S: ?Sized = dyn RecordStore> {
    service: BusinessDataService<S>,
    identity: Arc<dyn IdentityProvider>,
    state: WorkspaceState,
}

impl<S: RecordStore + ?Sized> Workspace<S> {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new(service: BusinessDataService<S>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            service,
            identity,
            state: WorkspaceState::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// The selected company, if it is in the loaded list.
    #[must_use]
    pub fn selected_company(&self) -> Option<&Company> {
        let selected = self.state.selected?;
        self.state.companies.iter().find(|c| c.id == selected)
    }

    /// Reloads the company list. Selects the first company if none is
    /// selected.
    pub async fn load_companies(&mut self) -> BusinessResult<&[Company]> {
        let companies = self.service.list_companies(self.identity.as_ref()).await?;
        self.state.companies = companies;

        if self.state.selected.is_none()
            && let Some(first) = self.state.companies.first().map(|c| c.id)
        {
            self.select_company(first).await?;
        }
        Ok(&self.state.companies)
    }

    /// Switches the selected company and loads its records and targets.
    ///
    /// Any load still in flight for the previous selection becomes stale.
    pub async fn select_company(&mut self, company_id: CompanyId) -> BusinessResult<()> {
        self.state.epoch += 1;
        self.state.selected = Some(company_id);
        self.state.records.clear();
        self.state.targets.clear();
        debug!(%company_id, epoch = self.state.epoch, "Company selected");
        self.refresh().await
    }

    /// Ticket for a load of the current selection.
    #[must_use]
    pub fn load_ticket(&self) -> Option<LoadTicket> {
        self.state.selected.map(|company_id| LoadTicket {
            company_id,
            epoch: self.state.epoch,
        })
    }

    /// Fetches records and targets for a ticket without touching the state.
    pub async fn load(&self, ticket: LoadTicket) -> BusinessResult<LoadedData> {
        let identity = self.identity.as_ref();
        let records = self
            .service
            .list_monthly_records(identity, ticket.company_id)
            .await?;
        let targets = self.service.list_targets(identity, ticket.company_id).await?;
        Ok(LoadedData {
            ticket,
            records,
            targets,
        })
    }

    /// Applies loaded data unless the selection changed since the ticket was
    /// issued. Returns whether the data was applied.
    pub fn apply_loaded(&mut self, data: LoadedData) -> bool {
        if self.load_ticket() != Some(data.ticket) {
            debug!(company_id = %data.ticket.company_id, "Discarding stale load");
            return false;
        }
        self.state.records = data.records;
        self.state.targets = data.targets;
        true
    }

    /// Reloads records and targets of the selected company.
    pub async fn refresh(&mut self) -> BusinessResult<()> {
        let Some(ticket) = self.load_ticket() else {
            return Ok(());
        };
        let data = self.load(ticket).await?;
        self.apply_loaded(data);
        Ok(())
    }

    /// Stores a month's figures for the selected company.
    pub async fn submit(&mut self, input: &MonthlyEntryInput) -> BusinessResult<Vec<Advisory>> {
        let saved = self
            .service
            .submit_monthly_record(self.identity.as_ref(), self.state.selected, input)
            .await?;
        self.apply_records(saved.record.company_id, saved.records);
        Ok(saved.advisories)
    }

    /// Edits a record's figures.
    pub async fn update_record(
        &mut self,
        record_id: MonthlyRecordId,
        patch: &MonthlyRecordPatch,
    ) -> BusinessResult<MonthlyRecord> {
        let saved = self
            .service
            .update_monthly_record(self.identity.as_ref(), record_id, patch)
            .await?;
        self.apply_records(saved.record.company_id, saved.records);
        Ok(saved.record)
    }

    /// Deletes a record.
    pub async fn delete_record(&mut self, record_id: MonthlyRecordId) -> BusinessResult<()> {
        let company_id = self
            .state
            .records
            .iter()
            .find(|r| r.id == record_id)
            .map(|r| r.company_id);
        let records = self
            .service
            .delete_monthly_record(self.identity.as_ref(), record_id)
            .await?;
        if let Some(company_id) = company_id.or_else(|| records.first().map(|r| r.company_id)) {
            self.apply_records(company_id, records);
        }
        Ok(())
    }

    /// Creates a company and selects it.
    pub async fn create_company(&mut self, input: &CompanyInput) -> BusinessResult<Company> {
        let saved = self
            .service
            .create_company(self.identity.as_ref(), input)
            .await?;
        self.state.companies = saved.companies;
        self.select_company(saved.company.id).await?;
        Ok(saved.company)
    }

    /// Edits a company and selects it.
    pub async fn update_company(
        &mut self,
        company_id: CompanyId,
        input: &CompanyInput,
    ) -> BusinessResult<Company> {
        let saved = self
            .service
            .update_company(self.identity.as_ref(), company_id, input)
            .await?;
        self.state.companies = saved.companies;
        if self.state.selected != Some(company_id) {
            self.select_company(company_id).await?;
        }
        Ok(saved.company)
    }

    /// Sets the targets of a year for the selected company.
    pub async fn save_targets(&mut self, input: &TargetInput) -> BusinessResult<Target> {
        let saved = self
            .service
            .save_targets(self.identity.as_ref(), self.state.selected, input)
            .await?;
        if self.state.selected == Some(saved.target.company_id) {
            self.state.targets = saved.targets;
        }
        Ok(saved.target)
    }

    /// Alerts for the cached records of the selected company.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        alerts::alerts_for_latest(&self.state.records, &self.state.targets)
    }

    /// Dashboard for the cached data of the selected company.
    #[must_use]
    pub fn dashboard(&self) -> Option<Dashboard> {
        let company_id = self.state.selected?;
        Some(dashboard::build_dashboard(
            company_id,
            &self.state.records,
            &self.state.targets,
        ))
    }

    fn apply_records(&mut self, company_id: CompanyId, records: Vec<MonthlyRecord>) {
        if self.state.selected == Some(company_id) {
            self.state.records = records;
        }
    }
}
