//! Integration-style tests for haul-sim.
//!
//! Sessions here run real threads with a 1 ms tick, so every test finishes
//! in well under a second unless something is wrong.

#[cfg(test)]
mod helpers {
    use haul_board::{BoardSpec, EdgeSpec, ParcelSpec, TruckSpec};
    use haul_core::{Color, SessionConfig};
    use haul_score::ScoreCoefficients;

    pub const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(20);

    pub fn fast() -> SessionConfig {
        SessionConfig { tick_ms: 1, wait_quantum_ms: 1, shutdown_grace_ms: 2_000 }
    }

    /// ```text
    ///   Depot ──3── A ──2── B
    /// ```
    pub fn line(trucks: &[(&str, Color)], parcels: &[(&str, &str, Color)]) -> BoardSpec {
        BoardSpec {
            nodes: vec!["Depot".into(), "A".into(), "B".into()],
            edges: vec![EdgeSpec::new("Depot", "A", 3), EdgeSpec::new("A", "B", 2)],
            depot: "Depot".into(),
            trucks: trucks.iter().map(|&(n, c)| TruckSpec::new(n, c)).collect(),
            parcels: parcels.iter().map(|&(o, d, c)| ParcelSpec::new(o, d, c)).collect(),
            coefficients: ScoreCoefficients {
                wait_cost:           -1,
                pickup_cost:         -10,
                dropoff_cost:        -10,
                payoff:              3_000,
                on_color_multiplier: 2,
            },
        }
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use haul_core::{Color, SessionStatus};
    use haul_manager::{Dispatch, Manager, ManagerResult, NoopManager, Notification};
    use haul_truck::Truck;

    use super::helpers::*;
    use crate::{SessionBuilder, SimError};

    /// Counts notifications, never commands anything.
    #[derive(Default)]
    struct Counter {
        events: AtomicUsize,
    }

    impl Manager for Counter {
        fn on_event(&self, _truck: &Truck, _event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
            self.events.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn zero_parcels_finishes_without_instructions() {
        let spec = line(&[("T1", Color::SeaBlue), ("T2", Color::MidRed), ("T3", Color::Turquoise)], &[]);
        let mut session = SessionBuilder::new(spec, Counter::default()).config(fast()).build().unwrap();
        session.start().unwrap();
        let report = session.await_completion(TIMEOUT);

        assert_eq!(report.status, SessionStatus::Finished);
        assert!(report.is_success());
        assert_eq!(report.trucks_home, 3);
        assert_eq!(report.detached, 0);
        assert_eq!(session.manager().events.load(Ordering::Relaxed), 0);
        assert!(report.score <= 0, "only idle cost can be charged");
        for t in session.trucks() {
            assert!(!t.has_plan());
            assert_eq!(t.location(), Some(session.board().depot()));
        }
    }

    #[test]
    fn unbounded_await_returns_on_finish() {
        let spec = line(&[("T1", Color::SeaBlue)], &[]);
        let mut session = SessionBuilder::new(spec, NoopManager).config(fast()).build().unwrap();
        session.start().unwrap();
        let report = session.await_completion(Duration::MAX);
        assert_eq!(report.status, SessionStatus::Finished);
        assert_eq!(report.detached, 0);
    }

    #[test]
    fn fleet_index_past_u32_is_rejected() {
        assert_eq!(crate::builder::truck_id(0).unwrap(), haul_core::TruckId(0));
        assert!(matches!(
            crate::builder::truck_id(u32::MAX as usize),
            Err(SimError::FleetTooLarge(n)) if n == u32::MAX as usize
        ));
    }

    #[test]
    fn halt_stops_an_unfinishable_session() {
        let spec = line(&[("T1", Color::SeaBlue)], &[("A", "B", Color::SeaBlue)]);
        let mut session = SessionBuilder::new(spec, NoopManager).config(fast()).build().unwrap();
        session.start().unwrap();
        assert!(session.is_running());
        std::thread::sleep(Duration::from_millis(20));
        assert!(session.halt("user request"));
        assert!(!session.halt("again"));

        let report = session.await_completion(TIMEOUT);
        assert_eq!(report.status, SessionStatus::Halted("user request".into()));
        assert!(!session.is_finished());
        assert!(report.score < 0, "idle cost accrues while waiting");
        assert_eq!(report.delivered, 0);
        assert_eq!(report.census.total(), report.total_parcels);
    }

    #[test]
    fn timeout_halts() {
        let spec = line(&[("T1", Color::SeaBlue)], &[("A", "B", Color::SeaBlue)]);
        let mut session = SessionBuilder::new(spec, NoopManager).config(fast()).build().unwrap();
        session.start().unwrap();
        let report = session.await_completion(Duration::from_millis(30));
        assert!(matches!(report.status, SessionStatus::Halted(ref r) if r.starts_with("timed out")));
    }

    #[test]
    fn cannot_start_twice() {
        let spec = line(&[("T1", Color::SeaBlue)], &[]);
        let mut session = SessionBuilder::new(spec, NoopManager).config(fast()).build().unwrap();
        session.start().unwrap();
        assert!(matches!(session.start(), Err(SimError::NotReady(_))));
        session.await_completion(TIMEOUT);
    }

    #[test]
    fn bad_config_rejected() {
        let spec = line(&[("T1", Color::SeaBlue)], &[]);
        let cfg = haul_core::SessionConfig { tick_ms: 0, ..fast() };
        assert!(matches!(SessionBuilder::new(spec, NoopManager).config(cfg).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn bad_board_rejected() {
        let mut spec = line(&[("T1", Color::SeaBlue)], &[]);
        spec.depot = "Nowhere".into();
        assert!(matches!(SessionBuilder::new(spec, NoopManager).build(), Err(SimError::Board(_))));
    }

    #[test]
    fn tick_changes_are_reported() {
        let spec = line(&[("T1", Color::SeaBlue)], &[("A", "B", Color::SeaBlue)]);
        let mut session = SessionBuilder::new(spec, NoopManager).config(fast()).build().unwrap();
        session.start().unwrap();
        session.set_tick_duration(Duration::from_millis(3)).unwrap();
        assert!(session.set_tick_duration(Duration::ZERO).is_err());
        session.halt("done");
        let report = session.await_completion(TIMEOUT);
        assert_eq!(report.tick_changes.len(), 1);
        assert_eq!(report.tick_changes[0].from, Duration::from_millis(1));
        assert_eq!(report.tick_changes[0].to, Duration::from_millis(3));
    }

    /// Records that `run` was invoked on its own thread.
    #[derive(Default)]
    struct RunOnce {
        ran: Mutex<Option<String>>,
    }

    impl Manager for RunOnce {
        fn run(&self, _ctx: &Dispatch) -> ManagerResult<()> {
            *self.ran.lock().unwrap() = std::thread::current().name().map(str::to_owned);
            Ok(())
        }

        fn on_event(&self, _truck: &Truck, _event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
            Ok(())
        }
    }

    #[test]
    fn manager_run_gets_its_own_thread() {
        let spec = line(&[("T1", Color::SeaBlue)], &[]);
        let mut session = SessionBuilder::new(spec, RunOnce::default()).config(fast()).build().unwrap();
        session.start().unwrap();
        session.await_completion(TIMEOUT);
        assert_eq!(session.manager().ran.lock().unwrap().as_deref(), Some("manager"));
    }
}

// ── Notifications ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod notifications {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use haul_core::{Color, SessionStatus, TruckId};
    use haul_manager::{Dispatch, Manager, ManagerError, ManagerResult, Notification};
    use haul_truck::Truck;

    use super::helpers::*;
    use crate::SessionBuilder;

    /// Sends the truck to A once, records the event sequence, and halts the
    /// session after arriving.
    #[derive(Default)]
    struct Tourist {
        log:     Mutex<Vec<Notification>>,
        sent:    AtomicBool,
        inside:  AtomicBool,
        overlap: AtomicBool,
    }

    impl Manager for Tourist {
        fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()> {
            if self.inside.swap(true, Ordering::AcqRel) {
                self.overlap.store(true, Ordering::Release);
            }
            self.log.lock().unwrap().push(event);
            let a = ctx.board.node_by_name("A").ok_or_else(|| ManagerError::Strategy("no A".into()))?;
            if event == Notification::Waiting && !self.sent.swap(true, Ordering::AcqRel) {
                truck.set_travel_path(&[ctx.board.depot(), a])?;
            }
            if event == Notification::ParcelAtNode {
                assert_eq!(truck.location(), Some(a));
            }
            self.inside.store(false, Ordering::Release);
            Ok(())
        }
    }

    /// Queues a plan from the manager thread while the truck is mid-wait,
    /// and flags any `Waiting` raised with that plan still queued.
    #[derive(Default)]
    struct LateRouter {
        log:           Mutex<Vec<Notification>>,
        waited_loaded: AtomicBool,
    }

    impl Manager for LateRouter {
        fn run(&self, ctx: &Dispatch) -> ManagerResult<()> {
            ctx.sleep(std::time::Duration::from_millis(40));
            let a = ctx.board.node_by_name("A").ok_or_else(|| ManagerError::Strategy("no A".into()))?;
            let truck = ctx.truck(TruckId(0)).ok_or_else(|| ManagerError::Strategy("no truck".into()))?;
            truck.set_travel_path(&[ctx.board.depot(), a])?;
            Ok(())
        }

        fn on_event(&self, truck: &Truck, event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
            if event == Notification::Waiting && truck.has_plan() {
                self.waited_loaded.store(true, Ordering::Release);
            }
            self.log.lock().unwrap().push(event);
            Ok(())
        }
    }

    #[test]
    fn plan_queued_during_wait_departs_without_waiting_event() {
        let spec = line(&[("T1", Color::SeaBlue)], &[("B", "Depot", Color::SeaBlue)]);
        let cfg = haul_core::SessionConfig { wait_quantum_ms: 300, ..fast() };
        let mut session = SessionBuilder::new(spec, LateRouter::default()).config(cfg).build().unwrap();
        session.start().unwrap();

        let deadline = std::time::Instant::now() + TIMEOUT;
        while !session.manager().log.lock().unwrap().contains(&Notification::LocationChanged) {
            assert!(std::time::Instant::now() < deadline, "truck never left");
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        session.halt("arrived");
        session.await_completion(TIMEOUT);

        assert!(!session.manager().waited_loaded.load(Ordering::Acquire));
        assert_eq!(session.manager().log.lock().unwrap()[0], Notification::LocationChanged);
    }

    #[test]
    fn parcel_at_node_follows_location_changed() {
        let spec = line(
            &[("T1", Color::SeaBlue)],
            &[("A", "Depot", Color::SeaBlue), ("A", "B", Color::MidRed)],
        );
        let mut session = SessionBuilder::new(spec, Tourist::default()).config(fast()).build().unwrap();
        session.start().unwrap();

        // Wait until the arrival has been reported, then stop.
        let deadline = std::time::Instant::now() + TIMEOUT;
        while !session.manager().log.lock().unwrap().contains(&Notification::ParcelAtNode) {
            assert!(std::time::Instant::now() < deadline, "truck never arrived");
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        session.halt("seen enough");
        let report = session.await_completion(TIMEOUT);
        assert!(matches!(report.status, SessionStatus::Halted(_)));

        let log = session.manager().log.lock().unwrap().clone();
        let arrivals: Vec<usize> = log
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Notification::LocationChanged)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(arrivals.len(), 1);
        assert_eq!(log[arrivals[0] + 1], Notification::ParcelAtNode);
        assert!(log[..arrivals[0]].iter().all(|e| *e == Notification::Waiting));
        assert!(!session.manager().overlap.load(Ordering::Acquire));
        assert_eq!(session.trucks()[0].id, TruckId(0));
    }

    #[test]
    fn no_parcel_at_node_for_empty_node() {
        let spec = line(&[("T1", Color::SeaBlue)], &[("B", "Depot", Color::SeaBlue)]);
        let mut session = SessionBuilder::new(spec, Tourist::default()).config(fast()).build().unwrap();
        session.start().unwrap();

        let deadline = std::time::Instant::now() + TIMEOUT;
        while !session.manager().log.lock().unwrap().contains(&Notification::LocationChanged) {
            assert!(std::time::Instant::now() < deadline, "truck never arrived");
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        session.halt("seen enough");
        session.await_completion(TIMEOUT);
        assert!(!session.manager().log.lock().unwrap().contains(&Notification::ParcelAtNode));
    }
}

// ── Commands under concurrency ────────────────────────────────────────────────

#[cfg(test)]
mod commands {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use haul_core::{Color, ParcelId, SessionStatus};
    use haul_manager::{Dispatch, Manager, ManagerError, ManagerResult, Notification};
    use haul_truck::{Truck, TruckError};

    use super::helpers::*;
    use crate::SessionBuilder;

    /// First WAITING: issue a plan whose first edge does not touch the depot.
    #[derive(Default)]
    struct Misdirect {
        rejected: Mutex<Vec<String>>,
        waits:    AtomicUsize,
    }

    impl Manager for Misdirect {
        fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()> {
            if event != Notification::Waiting {
                return Ok(());
            }
            if self.waits.fetch_add(1, Ordering::AcqRel) == 0 {
                let a = ctx.board.node_by_name("A").ok_or_else(|| ManagerError::Strategy("no A".into()))?;
                let b = ctx.board.node_by_name("B").ok_or_else(|| ManagerError::Strategy("no B".into()))?;
                let ab = ctx.board.edge_between(a, b).ok_or_else(|| ManagerError::Strategy("no A-B".into()))?;
                match truck.set_travel_plan(vec![ab]) {
                    Err(e @ TruckError::IllegalTravel { .. }) => self.rejected.lock().unwrap().push(e.to_string()),
                    other => other?,
                }
            }
            Ok(())
        }
    }

    #[test]
    fn illegal_plan_is_rejected_without_fault() {
        let spec = line(&[("T1", Color::SeaBlue)], &[("A", "B", Color::SeaBlue)]);
        let mut session = SessionBuilder::new(spec, Misdirect::default()).config(fast()).build().unwrap();
        session.start().unwrap();
        let deadline = std::time::Instant::now() + TIMEOUT;
        while session.manager().waits.load(Ordering::Acquire) < 3 {
            assert!(std::time::Instant::now() < deadline);
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        assert!(session.is_running());
        session.halt("done");
        let report = session.await_completion(TIMEOUT);
        assert!(matches!(report.status, SessionStatus::Halted(_)));
        assert_eq!(session.manager().rejected.lock().unwrap().len(), 1);
        let t = &session.trucks()[0];
        assert_eq!(t.location(), Some(session.board().depot()));
        assert!(!t.has_plan());
    }

    /// Sends every truck to A; on arrival each tries to grab parcel 0.
    #[derive(Default)]
    struct Grabbers {
        wins:   AtomicUsize,
        losses: AtomicUsize,
        sent:   Mutex<Vec<u32>>,
    }

    impl Manager for Grabbers {
        fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()> {
            let a = ctx.board.node_by_name("A").ok_or_else(|| ManagerError::Strategy("no A".into()))?;
            match event {
                Notification::Waiting if truck.location() == Some(ctx.board.depot()) => {
                    let mut sent = self.sent.lock().unwrap();
                    if !sent.contains(&truck.id.0) {
                        sent.push(truck.id.0);
                        truck.set_travel_path(&[ctx.board.depot(), a])?;
                    }
                }
                Notification::LocationChanged if truck.location() == Some(a) => match truck.pick_up(ParcelId(0)) {
                    Ok(()) => {
                        self.wins.fetch_add(1, Ordering::AcqRel);
                    }
                    Err(TruckError::Board(_)) => {
                        self.losses.fetch_add(1, Ordering::AcqRel);
                    }
                    Err(e) => return Err(e.into()),
                },
                _ => {}
            }
            Ok(())
        }
    }

    #[test]
    fn one_truck_wins_a_contested_parcel() {
        let trucks: Vec<(&str, Color)> = vec![
            ("T1", Color::SeaBlue),
            ("T2", Color::SeaBlue),
            ("T3", Color::SeaBlue),
            ("T4", Color::SeaBlue),
        ];
        let spec = line(&trucks, &[("A", "B", Color::SeaBlue)]);
        let mut session = SessionBuilder::new(spec, Grabbers::default()).config(fast()).build().unwrap();
        session.start().unwrap();
        let deadline = std::time::Instant::now() + TIMEOUT;
        let m = session.manager();
        while m.wins.load(Ordering::Acquire) + m.losses.load(Ordering::Acquire) < 4 {
            assert!(std::time::Instant::now() < deadline, "not every truck reached A");
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        session.halt("done");
        session.await_completion(TIMEOUT);

        assert_eq!(session.manager().wins.load(Ordering::Acquire), 1);
        assert_eq!(session.manager().losses.load(Ordering::Acquire), 3);
        let holders = session.trucks().iter().filter(|t| t.load() == Some(ParcelId(0))).count();
        assert_eq!(holders, 1);
        let census = session.board().census();
        assert_eq!((census.resting, census.held, census.delivered), (0, 1, 0));
    }
}

// ── Full delivery ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod delivery {
    use haul_core::{Color, ParcelId, SessionStatus};
    use haul_manager::{Dispatch, Manager, ManagerError, ManagerResult, Notification};
    use haul_truck::Truck;

    use super::helpers::*;
    use crate::SessionBuilder;

    /// One truck: depot → A, pick up, A → B, deliver, B → depot.
    struct Courier;

    impl Manager for Courier {
        fn on_event(&self, truck: &Truck, event: Notification, ctx: &Dispatch) -> ManagerResult<()> {
            let board = &ctx.board;
            let depot = board.depot();
            let a = board.node_by_name("A").ok_or_else(|| ManagerError::Strategy("no A".into()))?;
            let b = board.node_by_name("B").ok_or_else(|| ManagerError::Strategy("no B".into()))?;
            let Some(here) = truck.location() else { return Ok(()) };

            match event {
                Notification::Waiting if here == depot && !board.all_delivered() => {
                    truck.set_travel_path(&[depot, a])?;
                }
                Notification::LocationChanged if here == a && truck.load().is_none() && !board.all_delivered() => {
                    truck.pick_up(ParcelId(0))?;
                    truck.set_travel_path(&[a, b])?;
                }
                Notification::LocationChanged if here == b => {
                    truck.drop_off()?;
                    truck.set_travel_path(&[b, a, depot])?;
                }
                _ => {}
            }
            Ok(())
        }
    }

    fn run(truck_color: Color) -> crate::SessionReport {
        let spec = line(&[("T1", truck_color)], &[("A", "B", Color::MidRed)]);
        let mut session = SessionBuilder::new(spec, Courier).config(fast()).build().unwrap();
        session.start().unwrap();
        session.await_completion(TIMEOUT)
    }

    #[test]
    fn deliver_and_return_finishes() {
        let report = run(Color::MidRed);
        assert_eq!(report.status, SessionStatus::Finished);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.trucks_home, 1);
        assert_eq!(report.census.delivered, 1);
        // Payoff 3000 × 2, one pickup (-10), ten units of travel at speed 4
        // (-10) and however many ticks were spent idle.
        assert!(report.score > 5_000 && report.score <= 5_980, "score {}", report.score);
    }

    #[test]
    fn off_color_earns_base_payoff() {
        let report = run(Color::SeaBlue);
        assert_eq!(report.status, SessionStatus::Finished);
        assert!(report.score > 2_000 && report.score <= 2_980, "score {}", report.score);
    }
}

// ── Faults ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod faults {
    use haul_core::{Color, SessionStatus};
    use haul_manager::{Dispatch, Manager, ManagerError, ManagerResult, Notification};
    use haul_truck::Truck;

    use super::helpers::*;
    use crate::SessionBuilder;

    struct Failing;

    impl Manager for Failing {
        fn on_event(&self, _truck: &Truck, _event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
            Err(ManagerError::Strategy("lost the map".into()))
        }
    }

    struct Panicking;

    impl Manager for Panicking {
        fn on_event(&self, _truck: &Truck, _event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
            panic!("handler exploded");
        }
    }

    struct BadRun;

    impl Manager for BadRun {
        fn run(&self, _ctx: &Dispatch) -> ManagerResult<()> {
            Err(ManagerError::Strategy("no plan".into()))
        }

        fn on_event(&self, _truck: &Truck, _event: Notification, _ctx: &Dispatch) -> ManagerResult<()> {
            Ok(())
        }
    }

    fn spec() -> haul_board::BoardSpec {
        line(&[("T1", Color::SeaBlue), ("T2", Color::MidRed)], &[("A", "B", Color::SeaBlue)])
    }

    #[test]
    fn handler_error_faults_session() {
        let mut session = SessionBuilder::new(spec(), Failing).config(fast()).build().unwrap();
        session.start().unwrap();
        let report = session.await_completion(TIMEOUT);
        match report.status {
            SessionStatus::Faulted(cause) => assert!(cause.contains("lost the map"), "{cause}"),
            other => panic!("expected fault, got {other}"),
        }
        assert_eq!(report.detached, 0);
    }

    #[test]
    fn handler_panic_faults_session() {
        let mut session = SessionBuilder::new(spec(), Panicking).config(fast()).build().unwrap();
        session.start().unwrap();
        let report = session.await_completion(TIMEOUT);
        match report.status {
            SessionStatus::Faulted(cause) => assert!(cause.contains("handler exploded"), "{cause}"),
            other => panic!("expected fault, got {other}"),
        }
    }

    #[test]
    fn run_error_faults_session() {
        let mut session = SessionBuilder::new(spec(), BadRun).config(fast()).build().unwrap();
        session.start().unwrap();
        let report = session.await_completion(TIMEOUT);
        assert!(matches!(report.status, SessionStatus::Faulted(ref c) if c.contains("no plan")));
    }
}
