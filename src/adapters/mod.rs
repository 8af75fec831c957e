// Adapters layer: concrete clients for the homework status API and Telegram.

pub mod practicum;
pub mod telegram;

pub use practicum::PracticumClient;
pub use telegram::TelegramNotifier;
