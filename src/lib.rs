pub mod shared {
    pub mod infrastructure {
        pub mod db_health;
        pub mod store;
    }
}

pub mod modules {
    pub mod timers {
        pub mod core {
            pub mod errors;
            pub mod state;
        }
        pub mod ports;
        pub mod use_cases {
            pub mod http_error;
            pub mod create_timer {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod start_timer {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod stop_timer {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod timer_elapsed {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_timer {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_timers {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_timer {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod store_in_memory;
                pub mod store_sqlite;
            }
        }
    }

    pub mod ticks {
        pub mod consumer;
        pub mod ports;
        pub mod queue;
        pub mod service;
        pub mod use_cases {
            pub mod record_tick {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_ticks {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod tick_store_in_memory;
                pub mod tick_store_sqlite;
            }
        }
    }
}

pub mod shell;
