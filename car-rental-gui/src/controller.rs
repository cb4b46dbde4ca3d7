//! Presentation controller for the inventory window.
//!
//! Owns the latest car snapshot, the selection, and the form, and turns
//! user actions into store calls on background threads. Only one call is in
//! flight at a time; actions issued while busy are refused.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;

use car_rental_db::{Car, CarId, CarStore, NewCar};

use crate::backend::worker::spawn_background_op;
use crate::form::CarForm;
use crate::state::{AppMessage, BackgroundOperation, CarRow, Mutation, Notice};

pub struct Controller {
    store: CarStore,

    /// Cars from the most recent successful list, ordered by id.
    cars: Vec<Car>,

    /// Table rows derived from `cars`.
    rows: Vec<CarRow>,

    /// Id of the selected car, if any.
    selected: Option<CarId>,

    /// Form fields bound to the editor widgets.
    pub form: CarForm,

    /// Notices waiting to be shown, oldest first.
    notices: VecDeque<Notice>,

    /// Set while the delete confirmation is awaiting an answer.
    confirming_delete: bool,

    /// The store call currently in flight.
    pending: Option<BackgroundOperation>,

    message_rx: mpsc::Receiver<AppMessage>,
    message_tx: mpsc::Sender<AppMessage>,

    /// Woken by workers when a result arrives. `None` in headless use.
    repaint: Option<egui::Context>,
}

impl Controller {
    pub fn new(store: CarStore, repaint: Option<egui::Context>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            store,
            cars: Vec::new(),
            rows: Vec::new(),
            selected: None,
            form: CarForm::default(),
            notices: VecDeque::new(),
            confirming_delete: false,
            pending: None,
            message_rx: rx,
            message_tx: tx,
            repaint,
        }
    }

    // -- Read access for views --

    pub fn rows(&self) -> &[CarRow] {
        &self.rows
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn selected(&self) -> Option<CarId> {
        self.selected
    }

    pub fn selected_car(&self) -> Option<&Car> {
        let id = self.selected?;
        self.cars.iter().find(|c| c.id == id)
    }

    pub fn pending(&self) -> Option<&BackgroundOperation> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    // -- Selection --

    /// Select a car and mirror it into the form.
    pub fn select(&mut self, id: CarId) {
        match self.cars.iter().find(|c| c.id == id) {
            Some(car) => {
                self.form = CarForm::from_car(car);
                self.selected = Some(id);
            }
            None => self.clear_selection(),
        }
    }

    /// Clicking the selected row again deselects it.
    pub fn toggle_selection(&mut self, id: CarId) {
        if self.selected == Some(id) {
            self.clear_selection();
        } else {
            self.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.form.clear();
    }

    // -- Actions --

    /// Reload the table. Clears the form and selection when the list lands.
    pub fn refresh(&mut self) -> bool {
        if !self.guard_idle("refresh") {
            return false;
        }
        self.start_refresh();
        true
    }

    /// Validate the form and insert it as a new car.
    pub fn create_from_form(&mut self) -> bool {
        if !self.guard_idle("add") {
            return false;
        }
        let Some(car) = self.parse_form() else {
            return false;
        };

        let store = self.store.clone();
        let description = format!("Adding {} {}", car.make, car.model);
        self.start(description, move |op_id| AppMessage::Created {
            op_id,
            result: store.create(&car),
        });
        true
    }

    /// Validate the form and write it over the selected car.
    pub fn update_selected(&mut self) -> bool {
        if !self.guard_idle("update") {
            return false;
        }
        let Some(id) = self.require_selection() else {
            return false;
        };
        let Some(car) = self.parse_form() else {
            return false;
        };

        let car = car.with_id(id);
        self.start_mutation(Mutation::Update(id), move |store| store.update(&car));
        true
    }

    /// Ask for confirmation before deleting the selected car.
    pub fn request_delete(&mut self) -> bool {
        if !self.guard_idle("delete") || self.require_selection().is_none() {
            return false;
        }
        self.confirming_delete = true;
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Delete the selected car. Called once the user confirmed.
    pub fn delete_selected(&mut self) -> bool {
        self.confirming_delete = false;
        if !self.guard_idle("delete") {
            return false;
        }
        let Some(id) = self.require_selection() else {
            return false;
        };

        self.start_mutation(Mutation::Delete(id), move |store| store.delete(id));
        true
    }

    /// Mark the selected car as rented.
    pub fn rent_selected(&mut self) -> bool {
        self.change_availability(false)
    }

    /// Mark the selected car as available again.
    pub fn return_selected(&mut self) -> bool {
        self.change_availability(true)
    }

    fn change_availability(&mut self, available: bool) -> bool {
        let action = if available { "return" } else { "rent" };
        if !self.guard_idle(action) {
            return false;
        }
        let Some(id) = self.require_selection() else {
            return false;
        };

        let already = self
            .selected_car()
            .is_some_and(|car| car.available == available);
        if already {
            let message = if available {
                "Car is already available."
            } else {
                "Car already rented."
            };
            self.notices.push_back(Notice::info(message));
            return false;
        }

        self.start_mutation(Mutation::SetAvailability { id, available }, move |store| {
            store.set_availability(id, available)
        });
        true
    }

    // -- Results --

    /// Drain all pending messages from background threads.
    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.message_rx.try_recv() {
            self.handle_message(msg);
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) {
        let op_id = msg.op_id();
        if self.pending.as_ref().map(|op| op.id) != Some(op_id) {
            log::debug!("Dropping result of superseded operation {}", op_id);
            return;
        }
        if let Some(op) = self.pending.take() {
            log::debug!(
                "Operation {} finished in {:?}",
                op.id,
                op.started.elapsed()
            );
        }

        match msg {
            AppMessage::Listed { result, .. } => match result {
                Ok(cars) => self.apply_snapshot(cars),
                Err(e) => {
                    log::error!("Failed to list cars: {}", e);
                    self.apply_snapshot(Vec::new());
                    self.notices.push_back(Notice::database(&e));
                }
            },

            AppMessage::Created { result, .. } => match result {
                Ok(car) => {
                    log::info!(
                        "Added car {}: {} {} ({})",
                        car.id,
                        car.make,
                        car.model,
                        car.year
                    );
                    self.start_refresh();
                }
                Err(e) => {
                    log::error!("Failed to add car: {}", e);
                    self.notices.push_back(Notice::database(&e));
                }
            },

            AppMessage::Mutated {
                mutation, result, ..
            } => match result {
                Ok(true) => {
                    log::info!("{}: done", mutation.describe());
                    self.start_refresh();
                }
                Ok(false) => {
                    // Stale id: nothing to change. Reload so the row disappears.
                    log::warn!(
                        "{}: no car with id {}, reloading",
                        mutation.describe(),
                        mutation.car_id()
                    );
                    self.start_refresh();
                }
                Err(e) => {
                    log::error!("{}: {}", mutation.describe(), e);
                    self.notices.push_back(Notice::database(&e));
                }
            },
        }
    }

    // -- Internals --

    fn apply_snapshot(&mut self, cars: Vec<Car>) {
        self.rows = cars.iter().map(CarRow::from).collect();
        self.cars = cars;
        self.clear_selection();
    }

    fn guard_idle(&self, action: &str) -> bool {
        if let Some(op) = &self.pending {
            log::debug!("Ignoring {} while busy: {}", action, op.description);
            return false;
        }
        true
    }

    fn require_selection(&mut self) -> Option<CarId> {
        if self.selected.is_none() {
            self.notices.push_back(Notice::info("Select a car first."));
        }
        self.selected
    }

    fn parse_form(&mut self) -> Option<NewCar> {
        match self.form.parse() {
            Ok(car) => Some(car),
            Err(e) => {
                self.notices.push_back(Notice::validation(e.to_string()));
                None
            }
        }
    }

    fn start_refresh(&mut self) {
        let store = self.store.clone();
        self.start("Loading cars...".to_string(), move |op_id| {
            AppMessage::Listed {
                op_id,
                result: store.list(),
            }
        });
    }

    fn start_mutation<F>(&mut self, mutation: Mutation, call: F)
    where
        F: FnOnce(&CarStore) -> Result<bool, car_rental_db::StoreError> + Send + 'static,
    {
        let store = self.store.clone();
        self.start(mutation.describe(), move |op_id| AppMessage::Mutated {
            op_id,
            mutation,
            result: call(&store),
        });
    }

    fn start<F>(&mut self, description: String, work: F)
    where
        F: FnOnce(u64) -> AppMessage + Send + 'static,
    {
        let op = spawn_background_op(&self.message_tx, self.repaint.clone(), description, work);
        self.pending = Some(op);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use car_rental_db::StoreConfig;
    use tempfile::TempDir;

    use super::*;
    use crate::state::{Availability, NoticeKind};

    fn controller() -> (TempDir, Controller) {
        let dir = tempfile::tempdir().unwrap();
        let store = CarStore::connect(&StoreConfig::from_path(dir.path().join("cars.db"))).unwrap();
        (dir, Controller::new(store, None))
    }

    /// Deliver results until no operation is in flight.
    fn settle(c: &mut Controller) {
        while c.is_busy() {
            let msg = c
                .message_rx
                .recv_timeout(Duration::from_secs(10))
                .expect("background operation did not report back");
            c.handle_message(msg);
        }
    }

    fn fill(c: &mut Controller, make: &str, model: &str, year: &str, rate: &str) {
        c.form = CarForm {
            make: make.to_string(),
            model: model.to_string(),
            year: year.to_string(),
            rate: rate.to_string(),
            available: true,
        };
    }

    fn add(c: &mut Controller, make: &str, model: &str) -> CarId {
        fill(c, make, model, "2022", "45.0");
        assert!(c.create_from_form());
        settle(c);
        c.cars().last().unwrap().id
    }

    #[test]
    fn refresh_loads_empty_inventory() {
        let (_dir, mut c) = controller();
        assert!(c.refresh());
        settle(&mut c);
        assert!(c.rows().is_empty());
        assert!(c.current_notice().is_none());
    }

    #[test]
    fn create_then_refresh_shows_row_and_clears_form() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");

        assert_eq!(c.rows().len(), 1);
        let row = &c.rows()[0];
        assert_eq!(row.id, id);
        assert_eq!(row.make, "Toyota");
        assert_eq!(row.model, "Corolla");
        assert_eq!(row.year, "2022");
        assert_eq!(row.rate, "45.00");
        assert_eq!(row.status, Availability::Available);

        assert_eq!(c.form, CarForm::default());
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn empty_make_never_reaches_store() {
        let (_dir, mut c) = controller();
        add(&mut c, "Toyota", "Corolla");

        fill(&mut c, "", "Civic", "2020", "39.5");
        assert!(!c.create_from_form());
        assert!(!c.is_busy());

        let notice = c.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.message, "All fields are required.");

        assert!(c.refresh());
        settle(&mut c);
        assert_eq!(c.rows().len(), 1);
    }

    #[test]
    fn select_mirrors_car_into_form() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Honda", "Civic");

        c.select(id);
        assert_eq!(c.selected(), Some(id));
        assert_eq!(c.form.make, "Honda");
        assert_eq!(c.form.model, "Civic");
        assert_eq!(c.form.year, "2022");
        assert!(c.form.available);

        c.toggle_selection(id);
        assert_eq!(c.selected(), None);
        assert_eq!(c.form, CarForm::default());
    }

    #[test]
    fn update_requires_selection() {
        let (_dir, mut c) = controller();
        fill(&mut c, "Ford", "Focus", "2018", "25");
        assert!(!c.update_selected());
        assert_eq!(c.current_notice().unwrap().message, "Select a car first.");
    }

    #[test]
    fn update_selected_rewrites_row() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");
        let other = add(&mut c, "Honda", "Civic");

        c.select(id);
        c.form.model = "Camry".to_string();
        c.form.rate = "60".to_string();
        assert!(c.update_selected());
        settle(&mut c);

        let updated = c.cars().iter().find(|car| car.id == id).unwrap();
        assert_eq!(updated.model, "Camry");
        assert_eq!(updated.rate_per_day, 60.0);
        let untouched = c.cars().iter().find(|car| car.id == other).unwrap();
        assert_eq!(untouched.model, "Civic");
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn invalid_year_blocks_update() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");
        c.select(id);
        c.form.year = "soon".to_string();

        assert!(!c.update_selected());
        assert!(!c.is_busy());
        assert_eq!(c.current_notice().unwrap().message, "Year must be an integer.");
    }

    #[test]
    fn delete_needs_confirmation_and_selection() {
        let (_dir, mut c) = controller();
        assert!(!c.request_delete());
        assert!(!c.is_confirming_delete());
        c.dismiss_notice();

        let id = add(&mut c, "Toyota", "Corolla");
        c.select(id);
        assert!(c.request_delete());
        assert!(c.is_confirming_delete());

        c.cancel_delete();
        assert!(!c.is_confirming_delete());
        assert_eq!(c.rows().len(), 1);

        assert!(c.request_delete());
        assert!(c.delete_selected());
        assert!(!c.is_confirming_delete());
        settle(&mut c);
        assert!(c.rows().is_empty());
    }

    #[test]
    fn rent_and_return_round_trip() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");

        c.select(id);
        assert!(c.rent_selected());
        settle(&mut c);
        assert_eq!(c.rows()[0].status, Availability::Rented);

        c.select(id);
        assert!(c.return_selected());
        settle(&mut c);
        assert_eq!(c.rows()[0].status, Availability::Available);
        assert!(c.current_notice().is_none());
    }

    #[test]
    fn renting_a_rented_car_is_a_no_op() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");
        c.select(id);
        assert!(c.rent_selected());
        settle(&mut c);

        c.select(id);
        assert!(!c.rent_selected());
        assert!(!c.is_busy());
        let notice = c.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.message, "Car already rented.");
    }

    #[test]
    fn returning_an_available_car_is_a_no_op() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");
        c.select(id);

        assert!(!c.return_selected());
        assert!(!c.is_busy());
        assert_eq!(c.current_notice().unwrap().message, "Car is already available.");
    }

    #[test]
    fn busy_controller_refuses_actions() {
        let (_dir, mut c) = controller();
        assert!(c.refresh());
        assert!(c.is_busy());

        assert!(!c.refresh());
        fill(&mut c, "Toyota", "Corolla", "2022", "45");
        assert!(!c.create_from_form());
        assert!(c.current_notice().is_none());

        settle(&mut c);
        assert!(c.rows().is_empty());
    }

    #[test]
    fn stale_id_reloads_without_error() {
        let (_dir, mut c) = controller();
        let id = add(&mut c, "Toyota", "Corolla");
        c.select(id);

        // Someone else removes the row behind our back.
        assert!(c.store.delete(id).unwrap());

        assert!(c.rent_selected());
        settle(&mut c);
        assert!(c.rows().is_empty());
        assert!(c.current_notice().is_none());
    }

    #[test]
    fn list_failure_shows_error_and_empties_table() {
        let (dir, mut c) = controller();
        add(&mut c, "Toyota", "Corolla");
        assert_eq!(c.rows().len(), 1);

        drop(dir);
        assert!(c.refresh());
        settle(&mut c);

        assert!(c.rows().is_empty());
        let notice = c.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Database Error");
        assert!(!notice.message.is_empty());
    }

    #[test]
    fn superseded_results_are_dropped() {
        let (_dir, mut c) = controller();
        let stale = AppMessage::Listed {
            op_id: u64::MAX,
            result: Ok(vec![NewCar {
                make: "Ghost".to_string(),
                model: "Car".to_string(),
                year: 1999,
                rate_per_day: 1.0,
                available: true,
            }
            .with_id(99)]),
        };
        c.handle_message(stale);
        assert!(c.rows().is_empty());
    }
}
