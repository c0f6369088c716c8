pub mod config;
pub mod countdown;
pub mod messages;
pub mod question;
pub mod quote;
pub mod stats;
pub mod streak;
pub mod timer;

use studystreak_core::storage::APP_VERSION;
use studystreak_core::Store;

/// Open the store and run pending migrations, whichever command runs first.
pub fn open_store() -> Store {
    let store = Store::open();
    store.migrate(APP_VERSION);
    store
}
