pub mod lock;

pub type SpinMutex<T> = lock_api::Mutex<lock::RawSpinLock, T>;
