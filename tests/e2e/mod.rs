// End-to-end tests for the DocuCast Backend API
//
// Each test starts the real router on an ephemeral port, backed by an
// in-process speech engine stub and a temporary audio storage directory.
// Nothing is shared between tests, so they run in parallel.

mod helpers;
mod test_health;
mod test_podcasts;
