//! Planner-side operations: dashboard and shared projects

use crate::backend::Backend;
use crate::ids::next_id;
use eventide_core::error::Result;
use eventide_core::records::{Alert, PlannerDashboard, PlannerData, Project};
use eventide_core::types::{Channel, Collection};
use serde_json::json;

impl Backend {
    /// Assemble the planner dashboard
    pub fn planner_dashboard(&self) -> Result<PlannerDashboard> {
        let data: PlannerData =
            self.store.get(Collection::PlannerData, PlannerData::default())?;
        let mut projects: Vec<Project> = self.store.get(Collection::Projects, Vec::new())?;
        projects.reverse();
        Ok(PlannerDashboard {
            alerts: data.alerts,
            projects,
        })
    }

    /// Create a project shared with a client
    ///
    /// Appends to the shared project list, drops an alert onto the planner
    /// dashboard, and notifies both sides (`PLANNER_UPDATE` and
    /// `CLIENT_UPDATE`).
    pub fn create_project(&self, name: &str, client: &str, date: &str) -> Result<Project> {
        let project = Project {
            id: next_id("project"),
            name: name.to_string(),
            client: client.to_string(),
            status: "Planning".to_string(),
            progress: 0,
            date: date.to_string(),
        };
        let mut projects: Vec<Project> = self.store.get(Collection::Projects, Vec::new())?;
        projects.push(project.clone());
        self.store.set(Collection::Projects, &projects)?;

        let mut data: PlannerData =
            self.store.get(Collection::PlannerData, PlannerData::default())?;
        data.alerts.insert(
            0,
            Alert {
                id: next_id("alert"),
                text: format!("New project created: {name}"),
                time: "Just now".to_string(),
                kind: "success".to_string(),
            },
        );
        self.store.set(Collection::PlannerData, &data)?;

        let payload = json!({ "projectId": project.id });
        self.publish(Channel::Planner, &payload);
        self.publish(Channel::Client, &payload);
        Ok(project)
    }

    /// Update a project's stage label and progress
    pub fn update_project_progress(
        &self,
        project_id: &str,
        status: &str,
        progress: u8,
    ) -> Result<Project> {
        let mut projects: Vec<Project> = self.store.get(Collection::Projects, Vec::new())?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| eventide_core::Error::not_found("project", project_id))?;
        project.status = status.to_string();
        project.progress = progress.min(100);
        let updated = project.clone();
        self.store.set(Collection::Projects, &projects)?;
        self.publish(Channel::Planner, &json!({ "projectId": project_id }));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::test_backend;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn dashboard_shows_seeded_alerts_and_projects() {
        let backend = test_backend();
        let dash = backend.planner_dashboard().unwrap();
        assert_eq!(dash.alerts.len(), 2);
        assert_eq!(dash.projects.len(), 1);
    }

    #[test]
    fn create_project_adds_alert_and_notifies_both_sides() {
        let backend = test_backend();
        let planner_seen = Arc::new(Mutex::new(0u32));
        let client_seen = Arc::new(Mutex::new(0u32));
        {
            let p = planner_seen.clone();
            backend.relay().subscribe(Channel::Planner, move |_| *p.lock() += 1);
            let c = client_seen.clone();
            backend.relay().subscribe(Channel::Client, move |_| *c.lock() += 1);
        }

        let project = backend
            .create_project("Mehra Wedding", "Anika Mehra", "Dec 20")
            .unwrap();
        assert_eq!(*planner_seen.lock(), 1);
        assert_eq!(*client_seen.lock(), 1);

        let dash = backend.planner_dashboard().unwrap();
        // Newest first on both feeds.
        assert_eq!(dash.projects[0].id, project.id);
        assert!(dash.alerts[0].text.contains("Mehra Wedding"));
    }

    #[test]
    fn progress_is_capped_at_100() {
        let backend = test_backend();
        let project = backend.create_project("X", "Y", "Jan 01").unwrap();
        let updated = backend
            .update_project_progress(&project.id, "In Progress", 250)
            .unwrap();
        assert_eq!(updated.progress, 100);
    }
}
