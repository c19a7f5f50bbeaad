// Provider implementations for catalog backends
pub mod fakestore;

pub use fakestore::FakeStoreProvider;
