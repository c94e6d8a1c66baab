//! Workspace-level integration tests for FibAPI.
