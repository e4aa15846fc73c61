//! Apigee KvmProvider trait 实现

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::http_client;
use crate::providers::common::path_segment;
use crate::traits::{ErrorContext, KvmProvider};
use crate::types::{CreateEntryRequest, CreateKvmRequest, Entry, Environment, KeyValueMap};

use super::{ApigeeEntry, ApigeeProvider, ListEntriesResponse, MAX_PAGE_SIZE_ENTRIES};

impl ApigeeProvider {
    /// 将 KVM 名称列表转换为带显示序号的 `KeyValueMap`
    /// 列表接口不返回加密标志，本客户端创建的 KVM 一律加密
    pub(crate) fn names_to_kvms(names: Vec<String>) -> Vec<KeyValueMap> {
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| KeyValueMap {
                index,
                name,
                encrypted: true,
            })
            .collect()
    }

    /// 按名称升序排列条目
    pub(crate) fn sort_entries(entries: Vec<ApigeeEntry>) -> Vec<Entry> {
        let mut entries: Vec<Entry> = entries
            .into_iter()
            .map(|e| Entry {
                name: e.name,
                value: e.value,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[async_trait]
impl KvmProvider for ApigeeProvider {
    fn organization(&self) -> &str {
        &self.credentials.organization
    }

    async fn list_environments(&self) -> Result<Vec<Environment>> {
        let names: Vec<String> = self
            .get(&self.environments_path(), ErrorContext::default())
            .await?;
        Ok(names.into_iter().map(Environment::new).collect())
    }

    async fn list_kvms(&self, environment: &str) -> Result<Vec<KeyValueMap>> {
        let names: Vec<String> = self
            .get(
                &self.kvms_path(environment),
                ErrorContext::environment(environment),
            )
            .await?;
        Ok(Self::names_to_kvms(names))
    }

    async fn create_kvm(&self, environment: &str, req: &CreateKvmRequest) -> Result<()> {
        let name = req.name.trim();
        let body = CreateKvmRequest {
            name: name.to_string(),
            encrypted: req.encrypted,
        };
        self.post(
            &self.kvms_path(environment),
            &body,
            ErrorContext::environment(environment).creating(name),
        )
        .await
        .map(|_| ())
    }

    async fn delete_kvm(&self, environment: &str, name: &str) -> Result<()> {
        let path = format!("{}/{}", self.kvms_path(environment), path_segment(name));
        self.delete(&path, ErrorContext::kvm(environment, name.trim()))
            .await
    }

    async fn list_entries(&self, environment: &str, kvm: &str) -> Result<Vec<Entry>> {
        let base = self.entries_path(environment, kvm);
        let entries = collect_pages(kvm, move |token| {
            let path = page_path(&base, token.as_deref());
            async move {
                self.get::<ListEntriesResponse>(&path, ErrorContext::kvm(environment, kvm))
                    .await
            }
        })
        .await?;
        Ok(Self::sort_entries(entries))
    }

    async fn create_entry(
        &self,
        environment: &str,
        kvm: &str,
        req: &CreateEntryRequest,
    ) -> Result<Entry> {
        let name = req.name.trim();
        let body = ApigeeEntry {
            name: name.to_string(),
            value: req.value.clone(),
        };

        let text = self
            .post(
                &self.entries_path(environment, kvm),
                &body,
                ErrorContext::kvm(environment, kvm).creating(name),
            )
            .await?;
        created_entry(body, &text)
    }

    async fn delete_entry(&self, environment: &str, kvm: &str, name: &str) -> Result<()> {
        let path = format!(
            "{}/{}",
            self.entries_path(environment, kvm),
            path_segment(name)
        );
        self.delete(&path, ErrorContext::entry(environment, kvm, name.trim()))
            .await
    }
}

/// 条目列表某一页的请求路径
fn page_path(base: &str, page_token: Option<&str>) -> String {
    match page_token {
        Some(token) => format!(
            "{base}?pageSize={MAX_PAGE_SIZE_ENTRIES}&pageToken={}",
            urlencoding::encode(token)
        ),
        None => format!("{base}?pageSize={MAX_PAGE_SIZE_ENTRIES}"),
    }
}

/// 沿 `nextPageToken` 逐页拉取，直到 token 为空。
///
/// 服务端重复返回同一 token 时停止，已拉到的条目照常返回。
async fn collect_pages<F, Fut>(kvm: &str, mut fetch_page: F) -> Result<Vec<ApigeeEntry>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListEntriesResponse>>,
{
    let mut collected = Vec::new();
    let mut seen_tokens = HashSet::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = fetch_page(page_token.take()).await?;
        collected.extend(page.key_value_entries);

        match page.next_page_token {
            Some(token) if !token.is_empty() => {
                if !seen_tokens.insert(token.clone()) {
                    log::warn!("Repeated nextPageToken for {kvm}, stopping pagination");
                    break;
                }
                page_token = Some(token);
            }
            _ => break,
        }
    }

    Ok(collected)
}

/// 创建接口可能返回空正文，此时以请求体为准
fn created_entry(sent: ApigeeEntry, text: &str) -> Result<Entry> {
    if text.trim().is_empty() {
        return Ok(Entry::new(sent.name, sent.value));
    }
    let created: ApigeeEntry = http_client::parse_json(text)?;
    if created.name.is_empty() {
        return Err(ProviderError::ParseError {
            detail: "created entry has no name".to_string(),
        });
    }
    Ok(Entry::new(created.name, created.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kvms_get_positional_index() {
        let kvms = ApigeeProvider::names_to_kvms(vec!["b".into(), "a".into()]);
        assert_eq!(kvms.len(), 2);
        assert_eq!((kvms[0].index, kvms[0].name.as_str()), (0, "b"));
        assert_eq!((kvms[1].index, kvms[1].name.as_str()), (1, "a"));
        assert!(kvms.iter().all(|k| k.encrypted));
    }

    #[test]
    fn entries_sorted_by_name() {
        let entries = ApigeeProvider::sort_entries(vec![
            ApigeeEntry {
                name: "b".into(),
                value: "2".into(),
            },
            ApigeeEntry {
                name: "a".into(),
                value: "1".into(),
            },
        ]);
        let names: Vec<&str> = entries.iter().map(Entry::id).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    fn entry(name: &str, value: &str) -> ApigeeEntry {
        ApigeeEntry {
            name: name.into(),
            value: value.into(),
        }
    }

    fn page(names: &[&str], next: Option<&str>) -> ListEntriesResponse {
        ListEntriesResponse {
            key_value_entries: names.iter().map(|n| entry(n, "v")).collect(),
            next_page_token: next.map(str::to_string),
        }
    }

    /// 按请求的 token 返回预设页，并记录收到的 token
    async fn run_pages(
        pages: Vec<(Option<&'static str>, ListEntriesResponse)>,
    ) -> (Result<Vec<ApigeeEntry>>, Vec<Option<String>>) {
        let mut requested = Vec::new();
        let result = collect_pages("settings", |token: Option<String>| {
            requested.push(token.clone());
            let found = pages
                .iter()
                .position(|(t, _)| t.map(str::to_string) == token);
            let response = found.map(|i| ListEntriesResponse {
                key_value_entries: pages[i]
                    .1
                    .key_value_entries
                    .iter()
                    .map(|e| entry(&e.name, &e.value))
                    .collect(),
                next_page_token: pages[i].1.next_page_token.clone(),
            });
            async move {
                response.ok_or(ProviderError::NetworkError {
                    detail: "unexpected page token".into(),
                })
            }
        })
        .await;
        (result, requested)
    }

    fn names(entries: &[ApigeeEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[tokio::test]
    async fn follows_page_tokens_until_exhausted() {
        let (result, requested) = run_pages(vec![
            (None, page(&["a", "b"], Some("p2"))),
            (Some("p2"), page(&["c"], Some("p3"))),
            (Some("p3"), page(&["d"], None)),
        ])
        .await;

        assert_eq!(names(&result.unwrap()), vec!["a", "b", "c", "d"]);
        assert_eq!(
            requested,
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_token_ends_listing() {
        let (result, requested) = run_pages(vec![(None, page(&["only"], Some("")))]).await;
        assert_eq!(names(&result.unwrap()), vec!["only"]);
        assert_eq!(requested.len(), 1);
    }

    #[tokio::test]
    async fn repeated_token_stops_with_collected_entries() {
        let (result, requested) = run_pages(vec![
            (None, page(&["a"], Some("loop"))),
            (Some("loop"), page(&["b"], Some("loop"))),
        ])
        .await;

        assert_eq!(names(&result.unwrap()), vec!["a", "b"]);
        assert_eq!(requested, vec![None, Some("loop".to_string())]);
    }

    #[tokio::test]
    async fn page_failure_aborts_listing() {
        let (result, _) = run_pages(vec![(None, page(&["a"], Some("missing")))]).await;
        assert!(matches!(result, Err(ProviderError::NetworkError { .. })));
    }

    #[test]
    fn page_path_encodes_token() {
        let base = "/v1/organizations/acme/environments/prod/keyvaluemaps/settings/entries";
        assert_eq!(
            page_path(base, None),
            format!("{base}?pageSize={MAX_PAGE_SIZE_ENTRIES}")
        );
        assert_eq!(
            page_path(base, Some("a/b=")),
            format!("{base}?pageSize={MAX_PAGE_SIZE_ENTRIES}&pageToken=a%2Fb%3D")
        );
    }

    #[test]
    fn empty_create_response_echoes_request() {
        let created = created_entry(entry("timeout", "30"), "  \n").unwrap();
        assert_eq!(created, Entry::new("timeout", "30"));
    }

    #[test]
    fn create_response_body_wins() {
        let created = created_entry(
            entry("timeout", "30"),
            r#"{"name":"timeout","value":"45"}"#,
        )
        .unwrap();
        assert_eq!(created.value, "45");
    }

    #[test]
    fn create_response_without_name_is_parse_error() {
        let result = created_entry(entry("timeout", "30"), r#"{"value":"30"}"#);
        assert!(matches!(result, Err(ProviderError::ParseError { .. })));

        let result = created_entry(entry("timeout", "30"), r#"{"name":"","value":"30"}"#);
        assert!(matches!(result, Err(ProviderError::ParseError { .. })));
    }
}
