pub mod remote;

#[cfg(test)]
mod tests;

pub use remote::RemoteRepository;
