//! Async driver for `TodoPage`.
//!
//! # Design
//! Each handler is its own future. It locks the page just long enough to
//! build its request, performs the I/O with the lock released, then locks
//! again to resolve the response against whatever the page looks like by
//! then. Handlers can therefore overlap freely; none of them blocks another
//! while waiting on the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::page::{PendingRequest, TodoPage};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{TodoId, TodoItem, TodoSummary};

#[derive(Clone)]
pub struct TodoController {
    page: Arc<Mutex<TodoPage>>,
    transport: Arc<dyn Transport>,
    activated: Arc<AtomicBool>,
}

impl TodoController {
    pub fn new(page: TodoPage, transport: Arc<dyn Transport>) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
            transport,
            activated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Page talking to the configured API over reqwest.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            TodoPage::new(config.client()),
            Arc::new(ReqwestTransport::default()),
        )
    }

    /// Load the list the first time the page is shown. Later calls do nothing.
    pub async fn activate(&self) -> Result<(), ApiError> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let pending = self.page.lock().await.load();
        self.run(Some(pending)).await
    }

    pub async fn set_input(&self, value: impl Into<String>) {
        self.page.lock().await.set_input(value);
    }

    pub async fn on_add_click(&self) -> Result<(), ApiError> {
        let pending = self.page.lock().await.on_add_click();
        self.run(pending).await
    }

    pub async fn on_key_press(&self) -> Result<(), ApiError> {
        let pending = self.page.lock().await.on_key_press();
        self.run(pending).await
    }

    pub async fn toggle_done(&self, id: &TodoId) -> Result<(), ApiError> {
        let pending = self.page.lock().await.toggle_done(id);
        self.run(pending).await
    }

    pub async fn change_mode(&self, id: &TodoId, is_edit: bool) {
        self.page.lock().await.change_mode(id, is_edit);
    }

    pub async fn save(&self, id: &TodoId, title: impl Into<String>) -> Result<(), ApiError> {
        let pending = self.page.lock().await.save(id, title);
        self.run(pending).await
    }

    pub async fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        let pending = self.page.lock().await.delete(id);
        self.run(Some(pending)).await
    }

    pub async fn items(&self) -> Vec<TodoItem> {
        self.page.lock().await.items().to_vec()
    }

    pub async fn input(&self) -> String {
        self.page.lock().await.input().to_string()
    }

    pub async fn summary(&self) -> TodoSummary {
        self.page.lock().await.summary()
    }

    async fn run(&self, pending: Option<PendingRequest>) -> Result<(), ApiError> {
        let Some(pending) = pending else {
            return Ok(());
        };
        let response = self.transport.execute(pending.request.clone()).await;
        self.page.lock().await.resolve(pending, response)
    }
}
