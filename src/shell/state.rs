use std::sync::Arc;
use std::time::Duration;

use crate::modules::ticks::adapters::outbound::tick_store_in_memory::InMemoryTickStore;
use crate::modules::ticks::ports::TickStore;
use crate::modules::ticks::queue::TickQueue;
use crate::modules::ticks::service::TickService;
use crate::modules::timers::adapters::outbound::store_in_memory::InMemoryTimerStore;
use crate::modules::timers::ports::TimerStore;
use crate::modules::timers::use_cases::create_timer::handler::CreateTimerHandler;
use crate::modules::timers::use_cases::delete_timer::handler::DeleteTimerHandler;
use crate::modules::timers::use_cases::get_timer::handler::GetTimerHandler;
use crate::modules::timers::use_cases::list_timers::handler::ListTimersHandler;
use crate::modules::timers::use_cases::start_timer::handler::StartTimerHandler;
use crate::modules::timers::use_cases::stop_timer::handler::StopTimerHandler;
use crate::modules::timers::use_cases::timer_elapsed::handler::TimerElapsedHandler;
use crate::shared::infrastructure::db_health::DbHealthMonitor;
use crate::shared::infrastructure::store::StorePing;

#[derive(Clone)]
pub struct AppState {
    pub create_timer: Arc<CreateTimerHandler>,
    pub start_timer: Arc<StartTimerHandler>,
    pub stop_timer: Arc<StopTimerHandler>,
    pub timer_elapsed: Arc<TimerElapsedHandler>,
    pub get_timer: Arc<GetTimerHandler>,
    pub list_timers: Arc<ListTimersHandler>,
    pub delete_timer: Arc<DeleteTimerHandler>,
    pub tick_queue: Arc<TickQueue>,
    pub tick_service: Arc<TickService>,
    pub health: Arc<DbHealthMonitor>,
}

impl AppState {
    pub fn new(
        timer_store: Arc<dyn TimerStore>,
        tick_store: Arc<dyn TickStore>,
        ping: Arc<dyn StorePing>,
        max_buffer_size: usize,
        probe_interval: Duration,
    ) -> Self {
        let tick_queue = Arc::new(TickQueue::new(max_buffer_size));
        let health = DbHealthMonitor::new(ping, probe_interval);
        let tick_service = Arc::new(TickService::new(
            tick_store,
            tick_queue.clone(),
            health.clone(),
        ));

        Self {
            create_timer: Arc::new(CreateTimerHandler::new(timer_store.clone())),
            start_timer: Arc::new(StartTimerHandler::new(timer_store.clone())),
            stop_timer: Arc::new(StopTimerHandler::new(timer_store.clone())),
            timer_elapsed: Arc::new(TimerElapsedHandler::new(timer_store.clone())),
            get_timer: Arc::new(GetTimerHandler::new(timer_store.clone())),
            list_timers: Arc::new(ListTimersHandler::new(timer_store.clone())),
            delete_timer: Arc::new(DeleteTimerHandler::new(timer_store)),
            tick_queue,
            tick_service,
            health,
        }
    }

    /// Fully in-memory wiring for tests and local development.
    pub fn in_memory() -> Self {
        Self::in_memory_with_stores().0
    }

    /// Same as `in_memory`, but hands back the concrete stores so tests
    /// can inject failures.
    pub fn in_memory_with_stores() -> (Self, InMemoryStores) {
        let timers = Arc::new(InMemoryTimerStore::new());
        let ticks = Arc::new(InMemoryTickStore::new());
        let state = Self::new(
            timers.clone(),
            ticks.clone(),
            ticks.clone(),
            1000,
            Duration::from_secs(5),
        );
        (state, InMemoryStores { timers, ticks })
    }
}

pub struct InMemoryStores {
    pub timers: Arc<InMemoryTimerStore>,
    pub ticks: Arc<InMemoryTickStore>,
}
