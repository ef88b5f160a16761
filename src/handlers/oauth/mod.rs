pub mod callback_handler;
pub mod token_exchange;

pub use callback_handler::callback_handler;
