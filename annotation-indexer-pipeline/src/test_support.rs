//! Hand-written mocks of the store, text source and search index.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use annotation_indexer_repository::{
    AnnotationStore, ResultPage, SearchIndexError, SearchIndexProvider, SearchSession,
    SessionInfo, StoreError, TextFetchError, TextSource, WriteResult,
};
use annotation_indexer_shared::{Query, Record};

/// A result page holding `records` with an optional continuation token.
pub fn page(records: Vec<Value>, next: Option<&str>) -> ResultPage {
    ResultPage::new(
        records.into_iter().map(Record::new).collect(),
        next.map(|token| format!("https://ar.example/services/c/search/s?page={token}")),
    )
}

/// Records `{"body": {"id": ...}}` for each id.
pub fn records(ids: &[&str]) -> Vec<Value> {
    ids.iter().map(|id| json!({ "body": { "id": id } })).collect()
}

/// Scripted responses of one search session.
///
/// Repeated reads of a page token pop its responses in order; the last one
/// keeps being returned.
#[derive(Default)]
pub struct MockSession {
    pages: HashMap<String, VecDeque<ResultPage>>,
    hits: VecDeque<Option<u64>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, token: &str, page: ResultPage) -> Self {
        self.pages.entry(token.to_string()).or_default().push_back(page);
        self
    }

    pub fn hits(mut self, hits: Option<u64>) -> Self {
        self.hits.push_back(hits);
        self
    }
}

fn next_scripted<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

/// Annotation store answering from scripted sessions, routed by query.
///
/// Unknown queries open a session whose first page is empty.
pub struct MockStore {
    routes: Vec<(Value, String)>,
    sessions: Mutex<HashMap<String, MockSession>>,
    pub opened: Mutex<Vec<Value>>,
    pub page_reads: AtomicUsize,
    pub info_reads: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            sessions: Mutex::new(HashMap::new()),
            opened: Mutex::new(Vec::new()),
            page_reads: AtomicUsize::new(0),
            info_reads: AtomicUsize::new(0),
        }
    }

    pub fn route(mut self, query: &Query, session: MockSession) -> Self {
        let id = format!("session-{}", self.routes.len());
        self.routes.push((query.to_value(), id.clone()));
        self.sessions.get_mut().unwrap().insert(id, session);
        self
    }

    pub fn page_reads(&self) -> usize {
        self.page_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnnotationStore for MockStore {
    async fn open_search(&self, query: &Query) -> Result<SearchSession, StoreError> {
        let body = query.to_value();
        self.opened.lock().unwrap().push(body.clone());

        let id = self
            .routes
            .iter()
            .find(|(route, _)| *route == body)
            .map(|(_, id)| id.clone())
            .unwrap_or_else(|| "unrouted".to_string());
        Ok(SearchSession::new(id))
    }

    async fn read_session_info(&self, session: &SearchSession) -> Result<SessionInfo, StoreError> {
        self.info_reads.fetch_add(1, Ordering::SeqCst);
        let mut sessions = self.sessions.lock().unwrap();
        let hits = sessions
            .get_mut(&session.id)
            .and_then(|s| next_scripted(&mut s.hits))
            .flatten();
        Ok(SessionInfo::new(hits))
    }

    async fn read_page(
        &self,
        session: &SearchSession,
        token: &str,
    ) -> Result<ResultPage, StoreError> {
        self.page_reads.fetch_add(1, Ordering::SeqCst);
        let mut sessions = self.sessions.lock().unwrap();
        let Some(scripted) = sessions.get_mut(&session.id) else {
            return Ok(page(vec![], None));
        };
        scripted
            .pages
            .get_mut(token)
            .and_then(next_scripted)
            .ok_or_else(|| StoreError::status(404, format!("no page {token}")))
    }

    async fn about(&self) -> Result<Value, StoreError> {
        Ok(json!({ "appName": "mock" }))
    }
}

/// Text source serving fixed texts by URI; unknown URIs answer 404.
pub struct MockTexts {
    texts: HashMap<String, String>,
    pub fetched: Mutex<Vec<String>>,
}

impl MockTexts {
    pub fn new() -> Self {
        Self {
            texts: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn text(mut self, uri: &str, text: &str) -> Self {
        self.texts.insert(uri.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl TextSource for MockTexts {
    async fn fetch_text(&self, uri: &str) -> Result<String, TextFetchError> {
        self.fetched.lock().unwrap().push(uri.to_string());
        self.texts
            .get(uri)
            .cloned()
            .ok_or(TextFetchError::StatusError(404))
    }
}

/// Search index recording every call it receives.
pub struct MockIndex {
    exists: AtomicBool,
    fail_create: AtomicBool,
    unhealthy: AtomicBool,
    results: Mutex<HashMap<String, WriteResult>>,
    pub calls: Mutex<Vec<String>>,
    pub writes: Mutex<Vec<(String, Value)>>,
}

impl MockIndex {
    pub fn new() -> Self {
        Self {
            exists: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            unhealthy: AtomicBool::new(false),
            results: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn existing(self) -> Self {
        self.exists.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    pub fn unhealthy(self) -> Self {
        self.unhealthy.store(true, Ordering::SeqCst);
        self
    }

    /// Answer writes of `id` with `result` instead of `created`.
    pub fn answer(self, id: &str, result: WriteResult) -> Self {
        self.results.lock().unwrap().insert(id.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn written_ids(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[async_trait]
impl SearchIndexProvider for MockIndex {
    async fn index_exists(&self, name: &str) -> Result<bool, SearchIndexError> {
        self.calls.lock().unwrap().push(format!("exists {name}"));
        Ok(self.exists.load(Ordering::SeqCst))
    }

    async fn delete_index(&self, name: &str) -> Result<(), SearchIndexError> {
        self.calls.lock().unwrap().push(format!("delete {name}"));
        self.exists.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn create_index(&self, name: &str, _mapping: &Value) -> Result<(), SearchIndexError> {
        self.calls.lock().unwrap().push(format!("create {name}"));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(SearchIndexError::creation("resource_already_exists_exception"));
        }
        self.exists.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn upsert(
        &self,
        _index: &str,
        id: &str,
        document: &Value,
    ) -> Result<WriteResult, SearchIndexError> {
        self.writes
            .lock()
            .unwrap()
            .push((id.to_string(), document.clone()));
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(WriteResult::Created))
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        Ok(!self.unhealthy.load(Ordering::SeqCst))
    }
}
