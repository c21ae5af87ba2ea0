use std::sync::{Arc, Mutex};

use checkrun::config::{HttpTask, SettingsMap};
use checkrun::exec::{BoxFuture, ExecutionResult, HttpResponse, TaskBackend};
use checkrun::report::Reporter;
use checkrun::template::substitute;
use checkrun::types::HttpMethod;

/// What the fake backend was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Commands {
        script: String,
        working_dir: Option<String>,
    },
    Http {
        url: String,
        method: HttpMethod,
    },
}

/// A fake backend that:
/// - substitutes its inputs like the real executors do
/// - records what would have run
/// - answers commands with their own script and requests with `200 ok`.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TaskBackend for FakeBackend {
    fn run_commands<'a>(
        &'a self,
        lines: &'a [String],
        settings: &'a SettingsMap,
        working_dir: Option<&'a str>,
        reporter: &'a dyn Reporter,
    ) -> BoxFuture<'a, ExecutionResult> {
        Box::pin(async move {
            let script = match substitute(&lines.join("\n"), settings) {
                Ok(s) => s,
                Err(e) => {
                    reporter.error(&e.to_string());
                    return ExecutionResult::failed(e.to_string());
                }
            };
            self.record(BackendCall::Commands {
                script: script.clone(),
                working_dir: working_dir.map(str::to_string),
            });
            ExecutionResult::succeeded(script).with_status(0)
        })
    }

    fn http_request<'a>(
        &'a self,
        task: &'a HttpTask,
        settings: &'a SettingsMap,
        reporter: &'a dyn Reporter,
    ) -> BoxFuture<'a, HttpResponse> {
        Box::pin(async move {
            let url = match substitute(&task.url, settings) {
                Ok(u) => u,
                Err(e) => {
                    reporter.error(&e.to_string());
                    return HttpResponse::default();
                }
            };
            self.record(BackendCall::Http {
                url,
                method: task.method(),
            });
            HttpResponse {
                success: true,
                status_code: 200,
                body: "ok".to_string(),
            }
        })
    }
}
