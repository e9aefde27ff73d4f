#![no_std]
#![no_main]

use core::cell::RefCell;

use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, Sio, Timer,
    adc::{Adc, AdcPin},
    clocks::init_clocks_and_plls,
    pac,
    pwm::Slices,
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};

use outdoor_light::{Config, Controller, Fixture, Sensors};
use rp_pico_outdoor_light::adc::AdcChannel;
use rp_pico_outdoor_light::pwm::{SliceChannel, SliceTiming};

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Outdoor Light ===");

    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let config = Config::DEFAULT;

    // PWM5 carries red (GPIO10/A) and the common anode (GPIO11/B),
    // PWM6 carries green (GPIO12/A) and blue (GPIO13/B)
    let timing = SliceTiming::for_frequency(
        clocks.system_clock.freq().to_Hz(),
        config.pwm_frequency_hz(),
    );
    let mut pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);

    pwm_slices.pwm5.set_div_int(timing.div_int);
    pwm_slices.pwm5.set_top(timing.top);
    pwm_slices.pwm5.enable();

    pwm_slices.pwm6.set_div_int(timing.div_int);
    pwm_slices.pwm6.set_top(timing.top);
    pwm_slices.pwm6.enable();

    let mut red = pwm_slices.pwm5.channel_a;
    let mut anode = pwm_slices.pwm5.channel_b;
    let mut green = pwm_slices.pwm6.channel_a;
    let mut blue = pwm_slices.pwm6.channel_b;

    red.output_to(pins.gpio10);
    anode.output_to(pins.gpio11);
    green.output_to(pins.gpio12);
    blue.output_to(pins.gpio13);

    let hz = config.pwm_frequency_hz();
    let fixture = Fixture::new(
        SliceChannel::new(anode, hz),
        SliceChannel::new(red, hz),
        SliceChannel::new(green, hz),
        SliceChannel::new(blue, hz),
    );

    // Photoresistor on GPIO27 (ADC1), potentiometer on GPIO26 (ADC0)
    let adc = RefCell::new(Adc::new(pac.ADC, &mut pac.RESETS));
    let ldr = AdcPin::new(pins.gpio27.into_floating_input()).unwrap();
    let pot = AdcPin::new(pins.gpio26.into_floating_input()).unwrap();
    let sensors = Sensors::new(AdcChannel::new(&adc, ldr), AdcChannel::new(&adc, pot));

    // Button to ground with internal pull-up, onboard LED as mode indicator
    let button = pins.gpio15.into_pull_up_input();
    let indicator = pins.led.into_push_pull_output();

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    let mut controller = Controller::new(button, indicator, sensors, fixture, timer, config);

    rprintln!("=== Starting ===");

    let Err(e) = controller.run_with(|status| rprintln!("{}", status));
    rprintln!("Hardware fault: {}", e);
    panic!();
}
