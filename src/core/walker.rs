//! Depth-first discovery of projects under a hierarchy node.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    gcp::{
        ApiError, ResourceManager, Service,
        types::{Folder, ProjectResource, continuation},
    },
    model::{Project, ResourceNode},
};

/// Pending work on the traversal stack.
#[derive(Debug)]
enum Frame {
    /// List the child folders of a node and schedule them.
    Expand(String),
    /// List the projects directly under a node.
    Projects(String),
}

/// Lazily yields every project in the subtree rooted at a node.
///
/// Each folder's subtree is visited before the projects that sit directly
/// under its parent. Listing failures are yielded once, after which the
/// iterator is exhausted.
pub struct ProjectWalker<'a, R: ResourceManager + ?Sized> {
    client: &'a R,
    stack: Vec<Frame>,
    ready: VecDeque<Project>,
    failed: bool,
}

impl<'a, R: ResourceManager + ?Sized> ProjectWalker<'a, R> {
    pub fn new(client: &'a R, root: &ResourceNode) -> Self {
        Self {
            client,
            stack: vec![Frame::Expand(root.to_string())],
            ready: VecDeque::new(),
            failed: false,
        }
    }

    fn step(&mut self, frame: Frame) -> Result<(), ApiError> {
        match frame {
            Frame::Expand(parent) => {
                let folders = self.list_folders(&parent)?;
                debug!(parent = %parent, count = folders.len(), "listed folders");

                self.stack.push(Frame::Projects(parent));
                self.stack
                    .extend(folders.into_iter().rev().map(|folder| {
                        debug!(
                            folder = %folder.name,
                            display_name = %folder.display_name,
                            "queued folder"
                        );
                        Frame::Expand(folder.name)
                    }));
            }
            Frame::Projects(parent) => {
                let projects = self.list_projects(&parent)?;
                debug!(parent = %parent, count = projects.len(), "listed projects");

                self.ready.extend(projects.into_iter().map(Project::from));
            }
        }
        Ok(())
    }

    fn list_folders(&self, parent: &str) -> Result<Vec<Folder>, ApiError> {
        drain_pages(Service::ResourceManager, |token| {
            let page = self.client.list_folders(parent, token)?;
            Ok((page.folders, continuation(page.next_page_token)))
        })
    }

    fn list_projects(&self, parent: &str) -> Result<Vec<ProjectResource>, ApiError> {
        drain_pages(Service::ResourceManager, |token| {
            let page = self.client.list_projects(parent, token)?;
            Ok((page.projects, continuation(page.next_page_token)))
        })
    }
}

impl<R: ResourceManager + ?Sized> Iterator for ProjectWalker<'_, R> {
    type Item = Result<Project, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(project) = self.ready.pop_front() {
                return Some(Ok(project));
            }
            if self.failed {
                return None;
            }

            let frame = self.stack.pop()?;
            if let Err(err) = self.step(frame) {
                self.failed = true;
                self.stack.clear();
                return Some(Err(err));
            }
        }
    }
}

/// Follows continuation tokens until the listing is exhausted.
pub(crate) fn drain_pages<T, F>(service: Service, mut fetch: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(Option<&str>) -> Result<(Vec<T>, Option<String>), ApiError>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let (page, next) = fetch(token.as_deref())?;
        items.extend(page);
        token = match next_token(service, token, next)? {
            Some(next) => Some(next),
            None => return Ok(items),
        };
    }
}

/// Advances paging, refusing a token identical to the one just sent.
pub(crate) fn next_token(
    service: Service,
    current: Option<String>,
    next: Option<String>,
) -> Result<Option<String>, ApiError> {
    match next {
        Some(next) if current.as_deref() == Some(next.as_str()) => {
            Err(ApiError::RepeatedPageToken {
                service,
                token: next,
            })
        }
        next => Ok(next),
    }
}
