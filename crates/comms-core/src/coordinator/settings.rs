use crate::error::Result;
use crate::settings::ProjectSettings;

/// Settings view: an editable copy of the project profile. Nothing reaches
/// the shared singleton until [`save`](Self::save) succeeds.
#[derive(Debug, Default)]
pub struct SettingsCoordinator {
    form: ProjectSettings,
    dirty: bool,
}

impl SettingsCoordinator {
    pub fn new(current: &ProjectSettings) -> Self {
        Self {
            form: current.clone(),
            dirty: false,
        }
    }

    pub fn form(&self) -> &ProjectSettings {
        &self.form
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ProjectSettings),
    {
        f(&mut self.form);
        self.dirty = true;
    }

    /// Discard unsaved edits.
    pub fn reset(&mut self, current: &ProjectSettings) {
        self.form = current.clone();
        self.dirty = false;
    }

    /// Validate the form and hand a copy to `replace`. An invalid form is
    /// kept for correction and `replace` is not called.
    pub fn save<F>(&mut self, replace: F) -> Result<()>
    where
        F: FnOnce(ProjectSettings) -> Result<()>,
    {
        self.form.validate()?;
        replace(self.form.clone())?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommsError;
    use crate::model::AppModel;
    use crate::types::ProjectPhase;

    #[test]
    fn save_replaces_singleton() {
        let mut model = AppModel::seeded();
        let mut c = SettingsCoordinator::new(model.settings());
        c.edit(|s| s.phase = ProjectPhase::Closure);
        assert!(c.is_dirty());
        assert_eq!(model.settings().phase, ProjectPhase::Execution);

        c.save(|s| model.replace_settings(s)).unwrap();
        assert_eq!(model.settings().phase, ProjectPhase::Closure);
        assert!(!c.is_dirty());
    }

    #[test]
    fn invalid_form_is_not_saved() {
        let mut model = AppModel::seeded();
        let before = model.clone();
        let mut c = SettingsCoordinator::new(model.settings());
        c.edit(|s| s.user_picture = Some("not-a-uri".into()));

        let err = c.save(|s| model.replace_settings(s)).unwrap_err();
        assert!(matches!(err, CommsError::InvalidPicture));
        assert_eq!(model, before);
        assert!(c.is_dirty());

        c.reset(model.settings());
        assert_eq!(c.form(), model.settings());
    }
}
