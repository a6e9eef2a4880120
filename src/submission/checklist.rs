use super::data::*;

impl ChecklistItemID {
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistItemID::ProjectName => "Project name filled",
            ChecklistItemID::Category => "Category selected",
            ChecklistItemID::Team => "Team name filled",
            ChecklistItemID::TechStack => "Tech stack documented",
            ChecklistItemID::Github => "GitHub repository link",
            ChecklistItemID::Summary => "Project summary",
            ChecklistItemID::DemoUrl => "Live demo URL",
            ChecklistItemID::Video => "Demo video link",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, ChecklistItemID::DemoUrl | ChecklistItemID::Video)
    }

    /// The form field this item watches.
    pub fn field<'a>(&self, form: &'a SubmissionForm) -> &'a str {
        match self {
            ChecklistItemID::ProjectName => &form.project_name,
            ChecklistItemID::Category => &form.category,
            ChecklistItemID::Team => &form.team_name,
            ChecklistItemID::TechStack => &form.tech_stack,
            ChecklistItemID::Github => &form.github_link,
            ChecklistItemID::Summary => &form.summary,
            ChecklistItemID::DemoUrl => &form.demo_link,
            ChecklistItemID::Video => &form.video_link,
        }
    }

    pub fn is_satisfied_by(&self, form: &SubmissionForm) -> bool {
        let value = self.field(form).trim();

        match self {
            ChecklistItemID::Github | ChecklistItemID::DemoUrl | ChecklistItemID::Video => {
                value.starts_with("http")
            }
            ChecklistItemID::Summary => value.chars().count() >= SUMMARY_MIN_CHARS,
            _ => !value.is_empty(),
        }
    }
}

pub fn build_checklist(form: &SubmissionForm) -> Vec<ChecklistItem> {
    ChecklistItemID::ALL
        .iter()
        .map(|id| ChecklistItem {
            id: *id,
            label: id.label(),
            required: id.is_required(),
            completed: id.is_satisfied_by(form),
        })
        .collect()
}

pub fn is_ready(checklist: &[ChecklistItem]) -> bool {
    checklist.iter().filter(|item| item.required).all(|item| item.completed)
}

pub fn submission_status(form: SubmissionForm) -> SubmissionStatus {
    let checklist = build_checklist(&form);

    let completed_count = checklist.iter().filter(|item| item.completed).count();
    let required_count = checklist.iter().filter(|item| item.required).count();
    let required_completed = checklist
        .iter()
        .filter(|item| item.required && item.completed)
        .count();
    let is_ready = is_ready(&checklist);

    SubmissionStatus {
        form,
        checklist,
        completed_count,
        required_count,
        required_completed,
        is_ready,
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        submission_status(SubmissionForm::default())
    }
}

/// Replaces the entry with the same id in place, or appends.
pub fn upsert_entry(entries: &mut Vec<ShowcaseEntry>, entry: ShowcaseEntry) {
    match entries.iter_mut().find(|existing| existing.id == entry.id) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}
