/// Test doubles simulating the bus controller, the host link, the capture
/// clock and the activity output during integration tests.
use can_daq::protocol::{
    bit_rate::BitRatePreset,
    transport::{
        can_frame::CanFrame,
        traits::{
            activity_indicator::ActivityIndicator,
            bridge_clock::BridgeClock,
            bus_configurator::BusConfigurator,
            can_bus::{CanReceiver, CanTransmitter, ReceiveError, TransmitError},
            host_link::{HostLinkRx, HostLinkTx},
        },
    },
};
use embassy_time::Duration as EmbassyDuration;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Duration};

#[allow(dead_code)]
fn to_std(duration: EmbassyDuration) -> Duration {
    Duration::from_micros(duration.as_micros())
}

//==================================================================================EVENT_LOG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
/// Observable side effects, in the order the bridge produced them.
pub enum Event {
    ClockRead(u64),
    Indicator(bool),
    HostWrite,
    Transmit(u32),
    Flush,
}

#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

#[allow(dead_code)]
impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn indicator_changes(&self) -> Vec<bool> {
        self.snapshot()
            .into_iter()
            .filter_map(|event| match event {
                Event::Indicator(active) => Some(active),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: Event) -> usize {
        self.snapshot().iter().filter(|event| **event == wanted).count()
    }
}

//==================================================================================CAN_BUS
#[allow(dead_code)]
/// Receive half fed by the test through [`BusProbe::inject`].
pub struct MockCanReceiver {
    rx: mpsc::UnboundedReceiver<Result<CanFrame, u32>>,
}

impl CanReceiver for MockCanReceiver {
    type Error = u32;

    async fn receive(&mut self, window: EmbassyDuration) -> Result<CanFrame, ReceiveError<u32>> {
        match timeout(to_std(window), self.rx.recv()).await {
            Ok(Some(Ok(frame))) => Ok(frame),
            Ok(Some(Err(code))) => Err(ReceiveError::Bus(code)),
            Ok(None) => {
                sleep(to_std(window)).await;
                Err(ReceiveError::Timeout)
            }
            Err(_) => Err(ReceiveError::Timeout),
        }
    }
}

#[allow(dead_code)]
/// Transmit half recording every frame queued on the bus.
pub struct MockCanTransmitter {
    tx: mpsc::UnboundedSender<CanFrame>,
    failures: Arc<Mutex<VecDeque<TransmitError<u32>>>>,
    log: EventLog,
}

impl CanTransmitter for MockCanTransmitter {
    type Error = u32;

    async fn transmit<'a>(
        &'a mut self,
        frame: &'a CanFrame,
        _window: EmbassyDuration,
    ) -> Result<(), TransmitError<u32>> {
        self.log.push(Event::Transmit(frame.id()));
        if let Some(failure) = self.failures.lock().unwrap().pop_front() {
            return Err(failure);
        }
        self.tx.send(*frame).map_err(|_| TransmitError::Bus(0xFFFF))
    }
}

#[allow(dead_code)]
/// Test-side view of the bus: inject received frames, observe transmissions.
pub struct BusProbe {
    inject: mpsc::UnboundedSender<Result<CanFrame, u32>>,
    transmitted: mpsc::UnboundedReceiver<CanFrame>,
    failures: Arc<Mutex<VecDeque<TransmitError<u32>>>>,
}

#[allow(dead_code)]
impl BusProbe {
    pub fn inject(&self, frame: CanFrame) {
        self.inject.send(Ok(frame)).unwrap();
    }

    pub fn inject_error(&self, code: u32) {
        self.inject.send(Err(code)).unwrap();
    }

    pub fn fail_next_transmit(&self, failure: TransmitError<u32>) {
        self.failures.lock().unwrap().push_back(failure);
    }

    pub fn try_transmitted(&mut self) -> Option<CanFrame> {
        self.transmitted.try_recv().ok()
    }

    pub async fn transmitted(&mut self) -> CanFrame {
        self.transmitted
            .recv()
            .await
            .expect("bus transmitter dropped")
    }
}

#[allow(dead_code)]
/// Build both bus halves and the probe observing them.
pub fn create_bus(log: &EventLog) -> (MockCanReceiver, MockCanTransmitter, BusProbe) {
    let (inject, rx) = mpsc::unbounded_channel();
    let (tx, transmitted) = mpsc::unbounded_channel();
    let failures = Arc::new(Mutex::new(VecDeque::new()));

    (
        MockCanReceiver { rx },
        MockCanTransmitter {
            tx,
            failures: failures.clone(),
            log: log.clone(),
        },
        BusProbe {
            inject,
            transmitted,
            failures,
        },
    )
}

//==================================================================================HOST_LINK
#[allow(dead_code)]
/// Inbound half: each host write arrives as one chunk, like a UART read
/// returning at the end of a burst.
pub struct MockHostRx {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
    pending: VecDeque<u8>,
    failing_reads: Arc<AtomicUsize>,
    flushes: Arc<AtomicUsize>,
    log: EventLog,
}

impl HostLinkRx for MockHostRx {
    type Error = &'static str;

    async fn read<'a>(
        &'a mut self,
        buf: &'a mut [u8],
        window: EmbassyDuration,
    ) -> Result<usize, Self::Error> {
        if self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err("uart read fault");
        }

        if self.pending.is_empty() {
            match timeout(to_std(window), self.rx.recv()).await {
                Ok(Some(chunk)) => self.pending.extend(chunk),
                Ok(None) => {
                    sleep(to_std(window)).await;
                    return Ok(0);
                }
                Err(_) => return Ok(0),
            }
        }

        let len = buf.len().min(self.pending.len());
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..len)) {
            *slot = byte;
        }
        Ok(len)
    }

    async fn flush_input(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Flush);
        self.flushes.fetch_add(1, Ordering::SeqCst);
        self.pending.clear();
        while self.rx.try_recv().is_ok() {}
        Ok(())
    }
}

#[allow(dead_code)]
/// Outbound half collecting every write.
pub struct MockHostTx {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    log: EventLog,
}

impl HostLinkTx for MockHostTx {
    type Error = &'static str;

    async fn write_all<'a>(&'a mut self, bytes: &'a [u8]) -> Result<(), Self::Error> {
        self.log.push(Event::HostWrite);
        self.tx.send(bytes.to_vec()).map_err(|_| "host closed")
    }
}

#[allow(dead_code)]
/// Test-side view of the host link: write requests, read device lines.
pub struct HostProbe {
    to_device: mpsc::UnboundedSender<Vec<u8>>,
    from_device: mpsc::UnboundedReceiver<Vec<u8>>,
    failing_reads: Arc<AtomicUsize>,
    flushes: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl HostProbe {
    pub fn write(&self, bytes: &[u8]) {
        self.to_device.send(bytes.to_vec()).unwrap();
    }

    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub async fn line(&mut self) -> String {
        let bytes = self
            .from_device
            .recv()
            .await
            .expect("device link dropped");
        String::from_utf8(bytes).expect("device lines are ASCII")
    }

    pub fn try_line(&mut self) -> Option<String> {
        self.from_device
            .try_recv()
            .ok()
            .map(|bytes| String::from_utf8(bytes).expect("device lines are ASCII"))
    }
}

#[allow(dead_code)]
/// Build both host link halves and the probe standing in for the desktop.
pub fn create_host_link(log: &EventLog) -> (MockHostRx, MockHostTx, HostProbe) {
    let (to_device, rx) = mpsc::unbounded_channel();
    let (tx, from_device) = mpsc::unbounded_channel();
    let failing_reads = Arc::new(AtomicUsize::new(0));
    let flushes = Arc::new(AtomicUsize::new(0));

    (
        MockHostRx {
            rx,
            pending: VecDeque::new(),
            failing_reads: failing_reads.clone(),
            flushes: flushes.clone(),
            log: log.clone(),
        },
        MockHostTx {
            tx,
            log: log.clone(),
        },
        HostProbe {
            to_device,
            from_device,
            failing_reads,
            flushes,
        },
    )
}

//==================================================================================CLOCK_AND_INDICATOR
#[derive(Clone)]
#[allow(dead_code)]
/// Clock returning a value set by the test.
pub struct MockClock {
    now: Arc<AtomicU64>,
    log: EventLog,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new(log: &EventLog, start_us: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_us)),
            log: log.clone(),
        }
    }

    pub fn set(&self, now_us: u64) {
        self.now.store(now_us, Ordering::SeqCst);
    }
}

impl BridgeClock for MockClock {
    fn now_micros(&self) -> u64 {
        let now = self.now.load(Ordering::SeqCst);
        self.log.push(Event::ClockRead(now));
        now
    }
}

#[allow(dead_code)]
/// Indicator recording every transition.
pub struct RecordingIndicator {
    log: EventLog,
}

#[allow(dead_code)]
impl RecordingIndicator {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl ActivityIndicator for RecordingIndicator {
    fn set_active(&self, active: bool) {
        self.log.push(Event::Indicator(active));
    }
}

//==================================================================================CONFIGURATOR
#[derive(Default)]
#[allow(dead_code)]
/// Bus configurator remembering the preset it was given.
pub struct MockConfigurator {
    pub configured: Option<BitRatePreset>,
    pub fail: bool,
}

impl BusConfigurator for MockConfigurator {
    type Error = &'static str;

    async fn configure(&mut self, preset: BitRatePreset) -> Result<(), Self::Error> {
        if self.fail {
            return Err("twai_driver_install failed");
        }
        self.configured = Some(preset);
        Ok(())
    }
}
