pub mod activity_bar;
pub mod car_form;
pub mod car_table;
pub mod dialogs;
pub mod status_badge;
