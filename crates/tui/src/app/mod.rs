use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use tracing::warn;

use client::{ApiClient, CategoryDraft, HttpTransport, PersonDraft, TotalsReport, TransactionDraft};
use engine::{
    Candidate, Catalog, Category, CategoryPurpose, Person, RuleViolation, Transaction,
    TransactionKind, eligible_categories,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui,
    ui::keymap::{AppAction, map_key},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    People,
    Categories,
    Transactions,
    ByPerson,
    ByCategory,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::People,
        Self::Categories,
        Self::Transactions,
        Self::ByPerson,
        Self::ByCategory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Categories => "Categories",
            Self::Transactions => "Transactions",
            Self::ByPerson => "By person",
            Self::ByCategory => "By category",
        }
    }

    fn from_digit(ch: char) -> Option<Section> {
        match ch {
            '1' => Some(Self::People),
            '2' => Some(Self::Categories),
            '3' => Some(Self::Transactions),
            '4' => Some(Self::ByPerson),
            '5' => Some(Self::ByCategory),
            _ => None,
        }
    }

    fn next(self) -> Section {
        match self {
            Self::People => Self::Categories,
            Self::Categories => Self::Transactions,
            Self::Transactions => Self::ByPerson,
            Self::ByPerson => Self::ByCategory,
            Self::ByCategory => Self::People,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListMode {
    #[default]
    List,
    Form,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersonField {
    #[default]
    Name,
    Age,
}

#[derive(Debug, Default)]
pub struct PersonForm {
    pub name: String,
    pub age: String,
    pub focus: PersonField,
}

#[derive(Debug, Default)]
pub struct PeopleState {
    pub items: Vec<Person>,
    pub selected: usize,
    pub mode: ListMode,
    pub form: PersonForm,
    pub editing_id: Option<i64>,
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryField {
    #[default]
    Description,
    Purpose,
}

#[derive(Debug)]
pub struct CategoryForm {
    pub description: String,
    pub purpose: CategoryPurpose,
    pub focus: CategoryField,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            purpose: CategoryPurpose::Expense,
            focus: CategoryField::Description,
        }
    }
}

#[derive(Debug, Default)]
pub struct CategoriesState {
    pub items: Vec<Category>,
    pub selected: usize,
    pub mode: ListMode,
    pub form: CategoryForm,
    pub editing_id: Option<i64>,
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionField {
    #[default]
    Description,
    Amount,
    Kind,
    Category,
    Person,
}

impl TransactionField {
    fn next(self) -> TransactionField {
        match self {
            Self::Description => Self::Amount,
            Self::Amount => Self::Kind,
            Self::Kind => Self::Category,
            Self::Category => Self::Person,
            Self::Person => Self::Description,
        }
    }
}

#[derive(Debug, Default)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category_id: Option<i64>,
    pub person_id: Option<i64>,
    pub focus: TransactionField,
}

#[derive(Debug, Default)]
pub struct TransactionsState {
    pub items: Vec<Transaction>,
    pub form: TransactionForm,
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ReportState {
    pub report: TotalsReport,
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub people: PeopleState,
    pub categories: CategoriesState,
    pub transactions: TransactionsState,
    pub report_people: ReportState,
    pub report_categories: ReportState,
    pub base_url: String,
    pub last_refresh: Option<DateTime<Local>>,
}

pub struct App {
    client: ApiClient<HttpTransport>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let client = ApiClient::new(HttpTransport::new(http, config.base_url.clone()));

        let state = AppState {
            section: Section::People,
            people: PeopleState::default(),
            categories: CategoriesState::default(),
            transactions: TransactionsState::default(),
            report_people: ReportState::default(),
            report_categories: ReportState::default(),
            base_url: config.base_url,
            last_refresh: None,
        };

        Ok(Self {
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.enter_section(Section::People).await;

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.section {
            Section::People => self.handle_people(action).await,
            Section::Categories => self.handle_categories(action).await,
            Section::Transactions => self.handle_transactions(action).await,
            Section::ByPerson | Section::ByCategory => self.handle_report(action).await,
        }
    }

    /// List-mode keys shared by every section: quit, tab switching, refresh.
    /// Returns `true` when the action was consumed.
    async fn handle_shared(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Input('q') => {
                self.should_quit = true;
                true
            }
            AppAction::Input('r') => {
                self.refresh_current().await;
                true
            }
            AppAction::Input(ch) => {
                if let Some(section) = Section::from_digit(ch) {
                    self.enter_section(section).await;
                    true
                } else {
                    false
                }
            }
            AppAction::NextField => {
                self.enter_section(self.state.section.next()).await;
                true
            }
            _ => false,
        }
    }

    async fn enter_section(&mut self, section: Section) {
        self.state.section = section;
        let needs_load = match section {
            Section::People => !self.state.people.loaded,
            Section::Categories => !self.state.categories.loaded,
            Section::Transactions => !self.state.transactions.loaded,
            Section::ByPerson => !self.state.report_people.loaded,
            Section::ByCategory => !self.state.report_categories.loaded,
        };
        if needs_load {
            self.refresh_current().await;
        }
    }

    async fn refresh_current(&mut self) {
        match self.state.section {
            Section::People => self.refresh_people().await,
            Section::Categories => self.refresh_categories().await,
            Section::Transactions => self.refresh_transactions().await,
            Section::ByPerson | Section::ByCategory => self.refresh_report().await,
        }
    }

    fn stamp_refresh(&mut self) {
        self.state.last_refresh = Some(Local::now());
    }

    // ----- people -----

    async fn handle_people(&mut self, action: AppAction) {
        match self.state.people.mode {
            ListMode::List => {
                if self.handle_shared(action).await {
                    return;
                }
                match action {
                    AppAction::Up => {
                        let people = &mut self.state.people;
                        people.selected = people.selected.saturating_sub(1);
                    }
                    AppAction::Down => {
                        let people = &mut self.state.people;
                        if people.selected + 1 < people.items.len() {
                            people.selected += 1;
                        }
                    }
                    AppAction::Input('c') => {
                        let people = &mut self.state.people;
                        people.form = PersonForm::default();
                        people.editing_id = None;
                        people.mode = ListMode::Form;
                    }
                    AppAction::Input('e') => {
                        let people = &mut self.state.people;
                        if let Some(person) = people.items.get(people.selected) {
                            people.form = PersonForm {
                                name: person.name.clone(),
                                age: person.age.to_string(),
                                focus: PersonField::Name,
                            };
                            people.editing_id = Some(person.id);
                            people.mode = ListMode::Form;
                        }
                    }
                    AppAction::Input('d') => self.delete_person().await,
                    _ => {}
                }
            }
            ListMode::Form => match action {
                AppAction::Cancel => {
                    self.state.people.mode = ListMode::List;
                    self.state.people.error = None;
                }
                AppAction::NextField => {
                    let form = &mut self.state.people.form;
                    form.focus = match form.focus {
                        PersonField::Name => PersonField::Age,
                        PersonField::Age => PersonField::Name,
                    };
                }
                AppAction::Submit => self.submit_person().await,
                AppAction::Backspace => {
                    let form = &mut self.state.people.form;
                    match form.focus {
                        PersonField::Name => {
                            form.name.pop();
                        }
                        PersonField::Age => {
                            form.age.pop();
                        }
                    }
                }
                AppAction::Input(ch) => {
                    let form = &mut self.state.people.form;
                    match form.focus {
                        PersonField::Name => form.name.push(ch),
                        PersonField::Age => {
                            if ch.is_ascii_digit() {
                                form.age.push(ch);
                            }
                        }
                    }
                }
                _ => {}
            },
        }
    }

    async fn refresh_people(&mut self) {
        self.state.people.loading = true;
        match self.client.people().await {
            Ok(items) => {
                let people = &mut self.state.people;
                people.items = items;
                people.selected = people.selected.min(people.items.len().saturating_sub(1));
                people.loaded = true;
                people.error = None;
                self.stamp_refresh();
            }
            Err(err) => {
                warn!("failed to load people: {err}");
                self.state.people.error = Some(err.to_string());
            }
        }
        self.state.people.loading = false;
    }

    async fn submit_person(&mut self) {
        let form = &self.state.people.form;
        let name = form.name.trim();
        if name.is_empty() {
            self.state.people.error = Some("name is required".to_string());
            return;
        }
        if name.chars().count() > 200 {
            self.state.people.error = Some("name must be at most 200 characters".to_string());
            return;
        }
        let Ok(age) = form.age.trim().parse::<u32>() else {
            self.state.people.error = Some("age must be a non-negative integer".to_string());
            return;
        };

        let draft = PersonDraft {
            name: name.to_string(),
            age,
        };
        let result = match self.state.people.editing_id {
            Some(id) => self.client.update_person(id, &draft).await,
            None => self.client.create_person(&draft).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.state.people.mode = ListMode::List;
                self.state.people.error = None;
                self.refresh_people().await;
            }
            Err(err) => {
                warn!("failed to save person: {err}");
                self.state.people.error = Some(err.to_string());
            }
        }
    }

    async fn delete_person(&mut self) {
        let Some(id) = self
            .state
            .people
            .items
            .get(self.state.people.selected)
            .map(|person| person.id)
        else {
            return;
        };
        match self.client.delete_person(id).await {
            Ok(()) => self.refresh_people().await,
            Err(err) => {
                warn!("failed to delete person: {err}");
                self.state.people.error = Some(err.to_string());
            }
        }
    }

    // ----- categories -----

    async fn handle_categories(&mut self, action: AppAction) {
        match self.state.categories.mode {
            ListMode::List => {
                if self.handle_shared(action).await {
                    return;
                }
                match action {
                    AppAction::Up => {
                        let categories = &mut self.state.categories;
                        categories.selected = categories.selected.saturating_sub(1);
                    }
                    AppAction::Down => {
                        let categories = &mut self.state.categories;
                        if categories.selected + 1 < categories.items.len() {
                            categories.selected += 1;
                        }
                    }
                    AppAction::Input('c') => {
                        let categories = &mut self.state.categories;
                        categories.form = CategoryForm::default();
                        categories.editing_id = None;
                        categories.mode = ListMode::Form;
                    }
                    AppAction::Input('e') => {
                        let categories = &mut self.state.categories;
                        if let Some(category) = categories.items.get(categories.selected) {
                            categories.form = CategoryForm {
                                description: category.description.clone(),
                                purpose: category.purpose,
                                focus: CategoryField::Description,
                            };
                            categories.editing_id = Some(category.id);
                            categories.mode = ListMode::Form;
                        }
                    }
                    AppAction::Input('d') => self.delete_category().await,
                    _ => {}
                }
            }
            ListMode::Form => match action {
                AppAction::Cancel => {
                    self.state.categories.mode = ListMode::List;
                    self.state.categories.error = None;
                }
                AppAction::NextField => {
                    let form = &mut self.state.categories.form;
                    form.focus = match form.focus {
                        CategoryField::Description => CategoryField::Purpose,
                        CategoryField::Purpose => CategoryField::Description,
                    };
                }
                AppAction::Submit => self.submit_category().await,
                AppAction::Backspace => {
                    let form = &mut self.state.categories.form;
                    if form.focus == CategoryField::Description {
                        form.description.pop();
                    }
                }
                AppAction::Up | AppAction::Down => {
                    let form = &mut self.state.categories.form;
                    if form.focus == CategoryField::Purpose {
                        form.purpose = match form.purpose {
                            CategoryPurpose::Expense => CategoryPurpose::Income,
                            CategoryPurpose::Income => CategoryPurpose::Both,
                            CategoryPurpose::Both => CategoryPurpose::Expense,
                        };
                    }
                }
                AppAction::Input(ch) => {
                    let form = &mut self.state.categories.form;
                    if form.focus == CategoryField::Description {
                        form.description.push(ch);
                    }
                }
                _ => {}
            },
        }
    }

    async fn refresh_categories(&mut self) {
        self.state.categories.loading = true;
        match self.client.categories().await {
            Ok(items) => {
                let categories = &mut self.state.categories;
                categories.items = items;
                categories.selected = categories
                    .selected
                    .min(categories.items.len().saturating_sub(1));
                categories.loaded = true;
                categories.error = None;
                self.stamp_refresh();
            }
            Err(err) => {
                warn!("failed to load categories: {err}");
                self.state.categories.error = Some(err.to_string());
            }
        }
        self.state.categories.loading = false;
    }

    async fn submit_category(&mut self) {
        let form = &self.state.categories.form;
        let description = form.description.trim();
        if description.is_empty() {
            self.state.categories.error = Some("description is required".to_string());
            return;
        }
        if description.chars().count() > 400 {
            self.state.categories.error =
                Some("description must be at most 400 characters".to_string());
            return;
        }

        let draft = CategoryDraft {
            description: description.to_string(),
            purpose: form.purpose,
        };
        let result = match self.state.categories.editing_id {
            Some(id) => self.client.update_category(id, &draft).await,
            None => self.client.create_category(&draft).await,
        };

        match result {
            Ok(_) => {
                self.state.categories.mode = ListMode::List;
                self.state.categories.error = None;
                self.refresh_categories().await;
            }
            Err(err) => {
                warn!("failed to save category: {err}");
                self.state.categories.error = Some(err.to_string());
            }
        }
    }

    async fn delete_category(&mut self) {
        let Some(id) = self
            .state
            .categories
            .items
            .get(self.state.categories.selected)
            .map(|category| category.id)
        else {
            return;
        };
        match self.client.delete_category(id).await {
            Ok(()) => self.refresh_categories().await,
            Err(err) => {
                warn!("failed to delete category: {err}");
                self.state.categories.error = Some(err.to_string());
            }
        }
    }

    // ----- transactions -----

    async fn handle_transactions(&mut self, action: AppAction) {
        match action {
            AppAction::NextField => {
                let form = &mut self.state.transactions.form;
                form.focus = form.focus.next();
            }
            AppAction::Submit => self.submit_transaction().await,
            AppAction::Cancel => {
                self.state.transactions.form = TransactionForm::default();
                self.state.transactions.error = None;
            }
            AppAction::Backspace => {
                let form = &mut self.state.transactions.form;
                match form.focus {
                    TransactionField::Description => {
                        form.description.pop();
                    }
                    TransactionField::Amount => {
                        form.amount.pop();
                    }
                    _ => {}
                }
            }
            AppAction::Up | AppAction::Down => {
                let delta: i64 = if action == AppAction::Up { -1 } else { 1 };
                match self.state.transactions.form.focus {
                    TransactionField::Kind => self.toggle_kind(),
                    TransactionField::Category => self.step_category(delta),
                    TransactionField::Person => self.step_person(delta),
                    _ => {}
                }
            }
            AppAction::Input(ch) => {
                // Text fields swallow characters; everything else falls
                // through to the shared list keys.
                let focus = self.state.transactions.form.focus;
                match focus {
                    TransactionField::Description => {
                        self.state.transactions.form.description.push(ch)
                    }
                    TransactionField::Amount => self.state.transactions.form.amount.push(ch),
                    _ => {
                        self.handle_shared(action).await;
                    }
                }
            }
            _ => {}
        }
    }

    async fn refresh_transactions(&mut self) {
        self.state.transactions.loading = true;

        // People and categories are independent; fetch them together.
        match tokio::try_join!(self.client.people(), self.client.categories()) {
            Ok((people, categories)) => {
                self.state.people.items = people;
                self.state.people.loaded = true;
                self.state.categories.items = categories;
                self.state.categories.loaded = true;
                self.state.transactions.error = None;
            }
            Err(err) => {
                warn!("failed to load reference data: {err}");
                self.state.transactions.error = Some(err.to_string());
                self.state.transactions.loading = false;
                return;
            }
        }

        self.refresh_transaction_list().await;
        self.state.transactions.loading = false;
    }

    async fn refresh_transaction_list(&mut self) {
        match self.client.transactions().await {
            Ok(items) => {
                self.state.transactions.items = items;
                self.state.transactions.loaded = true;
                self.stamp_refresh();
            }
            Err(err) => {
                warn!("failed to load transactions: {err}");
                self.state.transactions.error = Some(err.to_string());
            }
        }
    }

    fn selected_person_is_minor(&self) -> bool {
        self.state
            .transactions
            .form
            .person_id
            .and_then(|id| self.state.people.items.iter().find(|person| person.id == id))
            .is_some_and(Person::income_blocked)
    }

    /// Clears a selected category the current kind can no longer use. The
    /// engine leaves this consistency step to its caller.
    fn drop_ineligible_category(&mut self) {
        let kind = self.state.transactions.form.kind;
        let keep = self.state.transactions.form.category_id.is_some_and(|id| {
            eligible_categories(kind, &self.state.categories.items)
                .iter()
                .any(|category| category.id == id)
        });
        if !keep {
            self.state.transactions.form.category_id = None;
        }
    }

    fn toggle_kind(&mut self) {
        let next = match self.state.transactions.form.kind {
            TransactionKind::Expense => TransactionKind::Income,
            TransactionKind::Income => TransactionKind::Expense,
        };
        if next == TransactionKind::Income && self.selected_person_is_minor() {
            self.state.transactions.error =
                Some(RuleViolation::MinorIncomeRestricted.to_string());
            return;
        }
        self.state.transactions.form.kind = next;
        self.drop_ineligible_category();
    }

    fn step_category(&mut self, delta: i64) {
        let kind = self.state.transactions.form.kind;
        let ids: Vec<i64> = eligible_categories(kind, &self.state.categories.items)
            .iter()
            .map(|category| category.id)
            .collect();
        step_selection(&mut self.state.transactions.form.category_id, &ids, delta);
    }

    fn step_person(&mut self, delta: i64) {
        let ids: Vec<i64> = self
            .state
            .people
            .items
            .iter()
            .map(|person| person.id)
            .collect();
        step_selection(&mut self.state.transactions.form.person_id, &ids, delta);

        // Picking a minor while the form says income forces the kind back
        // to expense, with a warning.
        if self.selected_person_is_minor()
            && self.state.transactions.form.kind == TransactionKind::Income
        {
            self.state.transactions.form.kind = TransactionKind::Expense;
            self.state.transactions.error =
                Some(RuleViolation::MinorIncomeRestricted.to_string());
            self.drop_ineligible_category();
        }
    }

    async fn submit_transaction(&mut self) {
        let form = &self.state.transactions.form;
        let candidate = Candidate {
            description: &form.description,
            amount: &form.amount,
            kind: form.kind,
            category_id: form.category_id,
            person_id: form.person_id,
        };
        let catalog = Catalog {
            people: &self.state.people.items,
            categories: &self.state.categories.items,
        };

        let admitted = match engine::admit(&candidate, &catalog) {
            Ok(admitted) => admitted,
            Err(violation) => {
                self.state.transactions.error = Some(violation.to_string());
                return;
            }
        };

        let draft = TransactionDraft::from(admitted);
        match self.client.create_transaction(&draft).await {
            Ok(_) => {
                self.state.transactions.form = TransactionForm::default();
                self.state.transactions.error = None;
                self.refresh_transaction_list().await;
            }
            Err(err) => {
                warn!("failed to create transaction: {err}");
                self.state.transactions.error = Some(err.to_string());
            }
        }
    }

    // ----- reports -----

    async fn handle_report(&mut self, action: AppAction) {
        self.handle_shared(action).await;
    }

    async fn refresh_report(&mut self) {
        let section = self.state.section;
        let result = match section {
            Section::ByPerson => {
                self.state.report_people.loading = true;
                self.client.totals_by_person().await
            }
            _ => {
                self.state.report_categories.loading = true;
                self.client.totals_by_category().await
            }
        };
        let state = match section {
            Section::ByPerson => &mut self.state.report_people,
            _ => &mut self.state.report_categories,
        };
        match result {
            Ok(report) => {
                state.report = report;
                state.loaded = true;
                state.error = None;
            }
            Err(err) => {
                warn!("failed to load report: {err}");
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
        self.stamp_refresh();
    }
}

fn step_selection(selected: &mut Option<i64>, ids: &[i64], delta: i64) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let current = selected.and_then(|id| ids.iter().position(|&candidate| candidate == id));
    let next = match current {
        None => {
            if delta >= 0 {
                0
            } else {
                ids.len() - 1
            }
        }
        Some(index) => {
            let stepped = index as i64 + delta;
            stepped.clamp(0, ids.len() as i64 - 1) as usize
        }
    };
    *selected = Some(ids[next]);
}
