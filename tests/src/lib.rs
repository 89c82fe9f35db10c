//! Scanner behaviour checked end to end against a scripted probe.


#[cfg(test)]
mod cancellation;
#[cfg(test)]
mod discovery;
#[cfg(test)]
mod ports;
