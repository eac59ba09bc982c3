mod config;
mod message_queue;
