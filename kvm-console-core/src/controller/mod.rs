//! 控制器
//!
//! 持有选择状态、三级列表、草稿缓冲区和待展示提示。
//! 命令与远程结果都在同一所有者上折叠，远程调用以 [`Effect`] 的形式交给调用方执行。

mod command;
mod effect;
mod runner;
mod view;

pub use command::Command;
pub use effect::{Effect, Outcome, RequestToken};
pub use runner::{EffectRunner, drive};
pub use view::{ConsoleView, ListView};

use kvm_console_provider::{BatchCreateResult, Entry, Environment, KeyValueMap, ProviderError};

use crate::draft::EntryDraftBuffer;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::export::{self, ExportedEntries};
use crate::notice::Notice;
use crate::selection::{ListLevel, SelectionChange, SelectionState};

/// 列表与选择的单一所有者
#[derive(Debug)]
pub struct Controller {
    organization: String,
    selection: SelectionState,
    environments: Vec<Environment>,
    kvms: Vec<KeyValueMap>,
    entries: Vec<Entry>,
    draft: Option<EntryDraftBuffer>,
    generations: [u64; 3],
    loading: [bool; 3],
    notices: Vec<Notice>,
}

impl Controller {
    #[must_use]
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            selection: SelectionState::new(),
            environments: Vec::new(),
            kvms: Vec::new(),
            entries: Vec::new(),
            draft: None,
            generations: [0; 3],
            loading: [false; 3],
            notices: Vec::new(),
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn draft(&self) -> Option<&EntryDraftBuffer> {
        self.draft.as_ref()
    }

    pub fn is_loading(&self, level: ListLevel) -> bool {
        self.loading[level.index()]
    }

    /// 启动时拉取环境列表
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.fetch_environments()]
    }

    /// 取走所有待展示提示
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        log::debug!("Dispatch: {command:?}");
        match self.try_dispatch(command) {
            Ok(effects) => effects,
            Err(e) => {
                self.report(&e);
                Vec::new()
            }
        }
    }

    fn try_dispatch(&mut self, command: Command) -> CoreResult<Vec<Effect>> {
        match command {
            Command::SelectEnvironment(name) => Ok(self.select_environment(&name)),
            Command::SelectKvm(name) => self.select_kvm(&name),
            Command::NextPage(level) => {
                let total = self.len(level);
                self.selection.cursor_mut(level).next(total);
                Ok(Vec::new())
            }
            Command::PrevPage(level) => {
                self.selection.cursor_mut(level).prev();
                Ok(Vec::new())
            }
            Command::CreateKvm(name) => {
                let environment = self.require_environment()?;
                Ok(vec![Effect::CreateKvm {
                    environment,
                    name: required_name(&name)?,
                }])
            }
            Command::DeleteKvm(name) => {
                let environment = self.require_environment()?;
                Ok(vec![Effect::DeleteKvm {
                    environment,
                    name: required_name(&name)?,
                }])
            }
            Command::DeleteEntry(name) => {
                let (environment, kvm) = self.require_kvm()?;
                Ok(vec![Effect::DeleteEntry {
                    environment,
                    kvm,
                    name: required_name(&name)?,
                }])
            }
            Command::Refresh => Ok(vec![self.refresh()]),
            Command::SetStagingName(name) => {
                self.draft_mut()?.set_staging_name(name);
                Ok(Vec::new())
            }
            Command::SetStagingValue(value) => {
                self.draft_mut()?.set_staging_value(value);
                Ok(Vec::new())
            }
            Command::SetBulkText(text) => {
                self.draft_mut()?.set_bulk_text(text);
                Ok(Vec::new())
            }
            Command::AddPair => {
                self.draft_mut()?.add_pair()?;
                Ok(Vec::new())
            }
            Command::ImportBulk => {
                let added = self.draft_mut()?.import_bulk()?;
                self.notices
                    .push(Notice::info(format!("Imported {added} draft line(s)")));
                Ok(Vec::new())
            }
            Command::EditLine { index, name, value } => {
                self.draft_mut()?.edit_line(index, name, value)?;
                Ok(Vec::new())
            }
            Command::RemoveLine(index) => {
                self.draft_mut()?.remove_line(index)?;
                Ok(Vec::new())
            }
            Command::ToggleMode => {
                self.draft_mut()?.toggle_mode();
                Ok(Vec::new())
            }
            Command::Commit => self.commit(),
        }
    }

    /// 将远程结果折叠进状态，返回后续副作用
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::EnvironmentsListed { token, result } => {
                if self.accept(token) {
                    self.environments = self.list_or_empty("List environments", result);
                    self.settle(ListLevel::Environment);
                }
                Vec::new()
            }
            Outcome::KvmsListed { token, result } => {
                if self.accept(token) {
                    let operation = format!(
                        "List key-value maps in '{}'",
                        self.selection.environment().unwrap_or_default()
                    );
                    self.kvms = self.list_or_empty(&operation, result);
                    self.settle(ListLevel::Kvm);
                }
                Vec::new()
            }
            Outcome::EntriesListed { token, result } => {
                if self.accept(token) {
                    let operation = format!(
                        "List entries of '{}'",
                        self.selection.kvm().unwrap_or_default()
                    );
                    let mut entries = self.list_or_empty(&operation, result);
                    entries.sort_by(|a, b| a.name.cmp(&b.name));
                    self.entries = entries;
                    self.settle(ListLevel::Entry);
                }
                Vec::new()
            }
            Outcome::KvmCreated {
                environment,
                name,
                result,
            } => {
                if !self.mutation_succeeded(&format!("Create KVM '{name}'"), result) {
                    return Vec::new();
                }
                self.notices
                    .push(Notice::info(format!("Created KVM '{name}'")));
                self.refresh_kvms_in(&environment)
            }
            Outcome::KvmDeleted {
                environment,
                name,
                result,
            } => {
                if !self.mutation_succeeded(&format!("Delete KVM '{name}'"), result) {
                    return Vec::new();
                }
                self.notices
                    .push(Notice::info(format!("Deleted KVM '{name}'")));
                if self.selection.environment() == Some(environment.as_str())
                    && self.selection.kvm() == Some(name.as_str())
                {
                    self.close_entry_view();
                }
                self.refresh_kvms_in(&environment)
            }
            Outcome::EntriesCreated {
                environment,
                kvm,
                result,
            } => {
                match result {
                    Ok(batch) => self.report_batch(&batch),
                    Err(e) => self.report(&CoreError::remote("Create entries", e)),
                }
                self.refresh_entries_of(&environment, &kvm)
            }
            Outcome::EntryDeleted {
                environment,
                kvm,
                name,
                result,
            } => {
                if !self.mutation_succeeded(&format!("Delete entry '{name}'"), result) {
                    return Vec::new();
                }
                self.notices
                    .push(Notice::info(format!("Deleted entry '{name}'")));
                self.refresh_entries_of(&environment, &kvm)
            }
        }
    }

    pub fn view(&self) -> ConsoleView {
        let env_selected = self.selection.environment().is_some();
        let kvm_selected = self.selection.kvm().is_some();

        ConsoleView {
            organization: self.organization.clone(),
            breadcrumb: self.selection.breadcrumb(&self.organization),
            environments: ListView::build(
                &self.environments,
                self.selection.cursor(ListLevel::Environment),
                self.selection.environment(),
                self.is_loading(ListLevel::Environment),
                true,
            ),
            kvms: ListView::build(
                &self.kvms,
                self.selection.cursor(ListLevel::Kvm),
                self.selection.kvm(),
                self.is_loading(ListLevel::Kvm),
                env_selected,
            ),
            entries: ListView::build(
                &self.entries,
                self.selection.cursor(ListLevel::Entry),
                None,
                self.is_loading(ListLevel::Entry),
                kvm_selected,
            ),
            draft: self.draft.clone(),
        }
    }

    /// 导出当前 KVM 的全部条目（不限当前页）
    pub fn export_entries(&self) -> CoreResult<ExportedEntries> {
        export::export_entries(
            &self.entries,
            self.selection.environment(),
            self.selection.kvm(),
        )
    }

    // ===== 选择 =====

    fn select_environment(&mut self, name: &str) -> Vec<Effect> {
        let change = self.selection.select_environment(name);
        self.kvms.clear();
        self.invalidate(ListLevel::Kvm);
        self.close_entry_view();

        match (change, self.selection.environment()) {
            (SelectionChange::Selected, Some(environment)) => {
                let environment = environment.to_string();
                vec![self.fetch_kvms(environment)]
            }
            _ => Vec::new(),
        }
    }

    fn select_kvm(&mut self, name: &str) -> CoreResult<Vec<Effect>> {
        let change = self.selection.select_kvm(name)?;
        self.entries.clear();
        self.invalidate(ListLevel::Entry);
        self.draft = None;

        if change == SelectionChange::Deselected {
            return Ok(Vec::new());
        }
        self.draft = Some(EntryDraftBuffer::new());
        let (environment, kvm) = self.require_kvm()?;
        Ok(vec![self.fetch_entries(environment, kvm)])
    }

    /// 清除 KVM 选择及条目视图
    fn close_entry_view(&mut self) {
        self.selection.clear_kvm();
        self.entries.clear();
        self.draft = None;
        self.invalidate(ListLevel::Entry);
    }

    fn require_environment(&self) -> CoreResult<String> {
        self.selection
            .environment()
            .map(str::to_string)
            .ok_or_else(|| ValidationError::NoEnvironment.into())
    }

    fn require_kvm(&self) -> CoreResult<(String, String)> {
        let environment = self.require_environment()?;
        let kvm = self
            .selection
            .kvm()
            .ok_or(ValidationError::NoKvm)?
            .to_string();
        Ok((environment, kvm))
    }

    fn draft_mut(&mut self) -> CoreResult<&mut EntryDraftBuffer> {
        self.draft
            .as_mut()
            .ok_or_else(|| ValidationError::NoKvm.into())
    }

    fn len(&self, level: ListLevel) -> usize {
        match level {
            ListLevel::Environment => self.environments.len(),
            ListLevel::Kvm => self.kvms.len(),
            ListLevel::Entry => self.entries.len(),
        }
    }

    // ===== 拉取 =====

    /// 递增该级 generation 并标记为加载中
    fn issue(&mut self, level: ListLevel) -> RequestToken {
        let i = level.index();
        self.generations[i] += 1;
        self.loading[i] = true;
        RequestToken {
            level,
            generation: self.generations[i],
        }
    }

    /// 作废该级尚未返回的拉取
    fn invalidate(&mut self, level: ListLevel) {
        let i = level.index();
        self.generations[i] += 1;
        self.loading[i] = false;
    }

    fn accept(&self, token: RequestToken) -> bool {
        let current = self.generations[token.level.index()];
        if token.generation == current {
            true
        } else {
            log::debug!(
                "Dropping stale {} response (generation {}, current {current})",
                token.level.label(),
                token.generation
            );
            false
        }
    }

    fn settle(&mut self, level: ListLevel) {
        self.loading[level.index()] = false;
        let total = self.len(level);
        self.selection.cursor_mut(level).clamp(total);
    }

    fn fetch_environments(&mut self) -> Effect {
        Effect::ListEnvironments {
            token: self.issue(ListLevel::Environment),
        }
    }

    fn fetch_kvms(&mut self, environment: String) -> Effect {
        Effect::ListKvms {
            token: self.issue(ListLevel::Kvm),
            environment,
        }
    }

    fn fetch_entries(&mut self, environment: String, kvm: String) -> Effect {
        Effect::ListEntries {
            token: self.issue(ListLevel::Entry),
            environment,
            kvm,
        }
    }

    /// 重新拉取最深一级可见列表
    fn refresh(&mut self) -> Effect {
        match (self.selection.environment(), self.selection.kvm()) {
            (Some(env), Some(kvm)) => {
                let (env, kvm) = (env.to_string(), kvm.to_string());
                self.fetch_entries(env, kvm)
            }
            (Some(env), None) => {
                let env = env.to_string();
                self.fetch_kvms(env)
            }
            _ => self.fetch_environments(),
        }
    }

    /// 仅当选择未变化时刷新 KVM 列表
    fn refresh_kvms_in(&mut self, environment: &str) -> Vec<Effect> {
        if self.selection.environment() == Some(environment) {
            vec![self.fetch_kvms(environment.to_string())]
        } else {
            Vec::new()
        }
    }

    fn refresh_entries_of(&mut self, environment: &str, kvm: &str) -> Vec<Effect> {
        if self.selection.environment() == Some(environment) && self.selection.kvm() == Some(kvm) {
            vec![self.fetch_entries(environment.to_string(), kvm.to_string())]
        } else {
            Vec::new()
        }
    }

    // ===== 提交 =====

    fn commit(&mut self) -> CoreResult<Vec<Effect>> {
        let (environment, kvm) = self.require_kvm()?;
        let batch = self.draft_mut()?.commit_batch()?;

        for rejected in batch.rejected {
            self.report(&CoreError::from(rejected));
        }
        self.draft = Some(EntryDraftBuffer::new());

        if batch.requests.is_empty() {
            return Ok(vec![self.fetch_entries(environment, kvm)]);
        }
        Ok(vec![Effect::CreateEntries {
            environment,
            kvm,
            requests: batch.requests,
        }])
    }

    fn report_batch(&mut self, batch: &BatchCreateResult) {
        for failure in &batch.failures {
            self.notices.push(Notice::error(format!(
                "Create entry '{}' failed: {}",
                failure.entry_name, failure.reason
            )));
        }
        if batch.success_count > 0 {
            self.notices.push(Notice::info(format!(
                "Created {} entr{}",
                batch.success_count,
                if batch.success_count == 1 { "y" } else { "ies" }
            )));
        }
    }

    // ===== 错误 =====

    fn report(&mut self, error: &CoreError) {
        if error.is_expected() {
            log::warn!("{error}");
        } else {
            log::error!("{error}");
        }
        self.notices.push(Notice::from(error));
    }

    /// 列表失败时提示并回退为空集合
    fn list_or_empty<T>(
        &mut self,
        operation: &str,
        result: Result<Vec<T>, ProviderError>,
    ) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(e) => {
                self.report(&CoreError::remote(operation, e));
                Vec::new()
            }
        }
    }

    fn mutation_succeeded(&mut self, operation: &str, result: Result<(), ProviderError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&CoreError::remote(operation, e));
                false
            }
        }
    }
}

/// 去掉首尾空白；空名会落到集合路径上，直接拒绝
fn required_name(name: &str) -> CoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    Ok(name.to_string())
}
