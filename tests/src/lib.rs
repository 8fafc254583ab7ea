//! Cross-crate scenarios: the engine driven through the real probe adapters
//! against listeners on the loopback interface.

#[cfg(test)]
mod support;

#[cfg(test)]
mod engine {
    mod integration;
}

#[cfg(test)]
mod pipeline {
    mod integration;
}
