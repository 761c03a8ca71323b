pub mod webhook_event_repository;
