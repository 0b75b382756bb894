use crate::app::Controller;
use crate::audio::AudioOutput;
use crate::mpris::MprisHandle;

pub fn update_mpris<O: AudioOutput>(mpris: &MprisHandle, controller: &Controller<O>) {
    mpris.set_track(controller.current_track());
    mpris.set_status(controller.status());
}
