//! Minimal HTTP server that answers like the Resource Manager and Policy
//! Analyzer APIs, for driving the binary end to end.

use std::{
    collections::HashMap,
    io::{self, BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
};

use anyhow::Result;

const ACTIVITY_PATH: &str =
    "locations/global/activityTypes/serviceAccountKeyLastAuthentication/activities:query";

pub const NOT_ENABLED_BODY: &str = r#"{
  "error": {
    "code": 403,
    "message": "Policy Analyzer API has not been used in project 222 before or it is disabled.",
    "status": "PERMISSION_DENIED",
    "details": [{
      "@type": "type.googleapis.com/google.rpc.ErrorInfo",
      "reason": "SERVICE_DISABLED",
      "domain": "googleapis.com",
      "metadata": {"service": "policyanalyzer.googleapis.com", "consumer": "projects/222"}
    }]
  }
}"#;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub target: String,
    pub authorization: Option<String>,
    pub user_project: Option<String>,
}

#[derive(Default)]
pub struct FakeApiBuilder {
    routes: HashMap<String, (u16, String)>,
}

impl FakeApiBuilder {
    pub fn folders(mut self, parent: &str, body: &str) -> Self {
        self.routes.insert(
            format!("/v3/folders?parent={}", parent),
            (200, body.to_string()),
        );
        self
    }

    pub fn projects(mut self, parent: &str, body: &str) -> Self {
        self.routes.insert(
            format!("/v3/projects?parent={}", parent),
            (200, body.to_string()),
        );
        self
    }

    pub fn activities(mut self, project: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            format!("/v1/{}/{}", project, ACTIVITY_PATH),
            (status, body.to_string()),
        );
        self
    }

    /// Answers 200 with `body` for an exact, percent-decoded request target.
    pub fn route(mut self, target: &str, body: &str) -> Self {
        self.routes
            .insert(target.to_string(), (200, body.to_string()));
        self
    }

    pub fn start(self) -> Result<FakeApi> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let routes = self.routes;
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = serve(stream, &routes, &recorded);
            }
        });

        Ok(FakeApi { base_url, requests })
    }
}

pub struct FakeApi {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApi {
    pub fn builder() -> FakeApiBuilder {
        FakeApiBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Activity queries received so far, as project resource names.
    pub fn queried_projects(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| {
                route_key(&r.target)
                    .strip_prefix("/v1/")
                    .and_then(|rest| rest.strip_suffix(&format!("/{}", ACTIVITY_PATH)))
                    .map(str::to_string)
            })
            .collect()
    }
}

fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut authorization = None;
    let mut user_project = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.eq_ignore_ascii_case("authorization") {
            authorization = Some(value.trim().to_string());
        } else if name.eq_ignore_ascii_case("x-goog-user-project") {
            user_project = Some(value.trim().to_string());
        }
    }

    let target = percent_decode(request_line.split_whitespace().nth(1).unwrap_or("/"));
    recorded.lock().unwrap().push(RecordedRequest {
        target: target.clone(),
        authorization,
        user_project,
    });

    let (status, body) = match routes.get(&route_key(&target)) {
        Some((status, body)) => (*status, body.clone()),
        // Nodes without configured children are leaves.
        None if target.starts_with("/v3/") => (200, "{}".to_string()),
        None => (
            404,
            format!(
                r#"{{"error": {{"code": 404, "message": "no route for {}", "status": "NOT_FOUND"}}}}"#,
                target
            ),
        ),
    };

    let reason = if status < 400 { "OK" } else { "Error" };
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )?;
    stream.flush()
}

/// The request target without `pageSize`, which routes never depend on.
fn route_key(target: &str) -> String {
    let Some((path, query)) = target.split_once('?') else {
        return target.to_string();
    };
    let params: Vec<&str> = query
        .split('&')
        .filter(|param| !param.starts_with("pageSize="))
        .collect();
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let Some(value) = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            out.push(value);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
