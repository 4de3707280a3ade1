use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::adapter::LIST_TABLES_SQL;
use crate::rpc::{RpcError, RpcRows, SpannerDatabase, SpannerTransaction};
use crate::types::SpannerValue;

/// One RPC observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    BeginTransaction,
    /// Transaction-scoped run, with the translated SQL and sorted parameter
    /// names it carried.
    TxRun {
        sql: String,
        param_names: Vec<String>,
    },
    Commit,
    End,
    /// Single-use run outside any transaction.
    Run {
        sql: String,
    },
    UpdateSchema {
        statements: Vec<String>,
    },
    Close,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    run_responses: VecDeque<Result<RpcRows, String>>,
    begin_error: Option<String>,
    commit_error: Option<String>,
    end_error: Option<String>,
    tables: Vec<String>,
}

/// In-memory stand-in for the backing database.
///
/// Default behavior: transactions begin successfully, DML run calls report
/// one affected row, the catalog query answers from the table registry fed
/// by `update_schema`, and everything else returns an empty payload.
/// Scripted responses (FIFO) and injected failures override the defaults;
/// each injected failure applies to the next matching call only.
#[derive(Debug, Clone, Default)]
pub struct MockDatabase {
    state: Arc<Mutex<MockState>>,
}

impl MockDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a payload for the next unscripted run call, transaction-scoped
    /// or single-use.
    pub fn push_run_response(&self, payload: RpcRows) {
        self.lock().run_responses.push_back(Ok(payload));
    }

    /// Queue an error for the next run call.
    pub fn push_run_error(&self, message: impl Into<String>) {
        self.lock().run_responses.push_back(Err(message.into()));
    }

    /// Make the next `begin_transaction` fail.
    pub fn fail_begin(&self, message: impl Into<String>) {
        self.lock().begin_error = Some(message.into());
    }

    /// Make the next commit fail.
    pub fn fail_commit(&self, message: impl Into<String>) {
        self.lock().commit_error = Some(message.into());
    }

    /// Make the next `end` fail.
    pub fn fail_end(&self, message: impl Into<String>) {
        self.lock().end_error = Some(message.into());
    }

    /// Pre-register a table without going through `update_schema`.
    pub fn add_table(&self, name: impl Into<String>) {
        self.lock().tables.push(name.into());
    }

    /// Snapshot of every RPC the mock has observed, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, sql: &str, record: MockCall) -> Result<RpcRows, RpcError> {
        let mut state = self.lock();
        state.calls.push(record);

        if let Some(scripted) = state.run_responses.pop_front() {
            return scripted.map_err(RpcError);
        }

        if sql == LIST_TABLES_SQL {
            let rows = state
                .tables
                .iter()
                .map(|t| vec![SpannerValue::Text(t.clone())])
                .collect();
            return Ok(RpcRows::with_rows(vec!["table_name".to_string()], rows));
        }

        let head: String = sql
            .trim_start()
            .chars()
            .take(6)
            .collect::<String>()
            .to_ascii_uppercase();
        if matches!(head.as_str(), "INSERT" | "UPDATE" | "DELETE") {
            return Ok(RpcRows::affected(1));
        }

        Ok(RpcRows::default())
    }
}

#[async_trait]
impl SpannerDatabase for MockDatabase {
    async fn begin_transaction(&self) -> Result<Box<dyn SpannerTransaction>, RpcError> {
        let mut state = self.lock();
        state.calls.push(MockCall::BeginTransaction);
        if let Some(message) = state.begin_error.take() {
            return Err(RpcError(message));
        }
        drop(state);
        Ok(Box::new(MockTransaction { db: self.clone() }))
    }

    async fn run(
        &self,
        sql: &str,
        _params: &HashMap<String, SpannerValue>,
    ) -> Result<RpcRows, RpcError> {
        self.respond(
            sql,
            MockCall::Run {
                sql: sql.to_string(),
            },
        )
    }

    async fn update_schema(&self, statements: &[String]) -> Result<(), RpcError> {
        let mut state = self.lock();
        state.calls.push(MockCall::UpdateSchema {
            statements: statements.to_vec(),
        });
        for statement in statements {
            if let Some(name) = parse_created_table(statement) {
                state.tables.push(name);
            }
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), RpcError> {
        self.lock().calls.push(MockCall::Close);
        Ok(())
    }
}

/// Transaction handle produced by [`MockDatabase::begin_transaction`].
#[derive(Debug)]
pub struct MockTransaction {
    db: MockDatabase,
}

#[async_trait]
impl SpannerTransaction for MockTransaction {
    async fn run(
        &mut self,
        sql: &str,
        params: &HashMap<String, SpannerValue>,
    ) -> Result<RpcRows, RpcError> {
        let mut param_names: Vec<String> = params.keys().cloned().collect();
        param_names.sort();
        self.db.respond(
            sql,
            MockCall::TxRun {
                sql: sql.to_string(),
                param_names,
            },
        )
    }

    async fn commit(&mut self) -> Result<(), RpcError> {
        let mut state = self.db.lock();
        state.calls.push(MockCall::Commit);
        if let Some(message) = state.commit_error.take() {
            return Err(RpcError(message));
        }
        Ok(())
    }

    async fn end(&mut self) -> Result<(), RpcError> {
        let mut state = self.db.lock();
        state.calls.push(MockCall::End);
        if let Some(message) = state.end_error.take() {
            return Err(RpcError(message));
        }
        Ok(())
    }
}

/// Table name out of a `CREATE TABLE <name> ...` statement, if that is what
/// this statement is.
fn parse_created_table(statement: &str) -> Option<String> {
    let mut words = statement.split_whitespace();
    if !words.next()?.eq_ignore_ascii_case("CREATE") || !words.next()?.eq_ignore_ascii_case("TABLE")
    {
        return None;
    }
    words
        .next()
        .map(|name| name.trim_end_matches('(').to_string())
}
