#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use nexa_pico::utility::{get_controller_id, get_transmit_count, get_unit};
use nexa_pico::{nexa_log, NexaRemote, RemoteConfig, SwitchValue, Unit};
use panic_persist as _;
use static_cell::StaticCell;

#[cfg(feature = "usb-logger")]
use embassy_rp::bind_interrupts;
#[cfg(feature = "usb-logger")]
use embassy_rp::peripherals::USB;
#[cfg(feature = "usb-logger")]
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"NEXA-PICO"),
    embassy_rp::binary_info::rp_program_description!(
        c"Nexa 433 MHz remote control for Raspberry Pico 2"
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[cfg(feature = "usb-logger")]
bind_interrupts!(struct UsbIrqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

/// Holding the button this long sends group off instead of a toggle
const LONG_PRESS: Duration = Duration::from_secs(1);
/// Contact bounce settle time
const DEBOUNCE: Duration = Duration::from_millis(50);
/// Period of the scheduled toggle
const SCHEDULE_PERIOD: Duration = Duration::from_secs(30 * 60);

type Remote = NexaRemote<
    Output<'static>,
    Delay,
    nexa_pico::radio::GlobalCriticalSection,
    Output<'static>,
>;

/// Remote plus the last state sent to the configured unit.
struct Lights {
    remote: Remote,
    unit: Unit,
    on: bool,
}

impl Lights {
    async fn set(&mut self, on: bool) {
        match self.remote.switch_async(self.unit, SwitchValue::from(on)).await {
            Ok(()) => self.on = on,
            Err(e) => nexa_log!(warn, "switch failed, output error: {}", e.is_output()),
        }
    }

    async fn toggle(&mut self) {
        self.set(!self.on).await;
    }

    async fn all_off(&mut self) {
        match self.remote.send_async(nexa_pico::Command::GroupOff).await {
            Ok(()) => self.on = false,
            Err(e) => nexa_log!(warn, "group off failed, output error: {}", e.is_output()),
        }
    }
}

/// Shares the remote between embassy tasks
#[derive(Clone, Copy)]
pub struct SharedLights(&'static Mutex<CriticalSectionRawMutex, Lights>);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    #[cfg(feature = "usb-logger")]
    {
        let driver = Driver::new(p.USB, UsbIrqs);
        spawner.must_spawn(logger_task(driver));
    }

    if let Some(panic_message) = panic_persist::get_panic_message_utf8() {
        nexa_log!(error, "{}", panic_message);
        loop {
            Timer::after_secs(5).await;
        }
    }

    let config = RemoteConfig::default()
        .with_controller_id(get_controller_id())
        .with_transmit_count(get_transmit_count());

    // Data pin of the 433 MHz transmitter module, onboard LED as indicator
    let tx = Output::new(p.PIN_16, Level::Low);
    let led = Output::new(p.PIN_25, Level::Low);
    let button = Input::new(p.PIN_15, Pull::Up);

    let remote = NexaRemote::with_config(tx, Delay, config).with_indicator(led);

    let shared = SharedLights(&*{
        static LIGHTS: StaticCell<Mutex<CriticalSectionRawMutex, Lights>> = StaticCell::new();
        LIGHTS.init(Mutex::new(Lights {
            remote,
            unit: get_unit(),
            on: false,
        }))
    });

    nexa_log!(
        info,
        "nexa-pico ready: controller {}, unit {}",
        config.controller_id.raw(),
        get_unit().raw()
    );

    spawner.must_spawn(button_task(shared, button));
    spawner.must_spawn(schedule_task(shared));
}

#[cfg(feature = "usb-logger")]
#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

/// Short press toggles the unit, long press switches the whole group off.
#[embassy_executor::task]
async fn button_task(shared: SharedLights, mut button: Input<'static>) {
    loop {
        button.wait_for_falling_edge().await;
        Timer::after(DEBOUNCE).await;
        if button.is_high() {
            continue;
        }

        match select(button.wait_for_rising_edge(), Timer::after(LONG_PRESS)).await {
            Either::First(()) => shared.0.lock().await.toggle().await,
            Either::Second(()) => {
                shared.0.lock().await.all_off().await;
                button.wait_for_high().await;
            }
        }
    }
}

#[embassy_executor::task]
async fn schedule_task(shared: SharedLights) {
    loop {
        Timer::after(SCHEDULE_PERIOD).await;
        nexa_log!(info, "scheduled toggle");
        shared.0.lock().await.toggle().await;
    }
}
