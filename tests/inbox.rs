mod tests {
    use myrtio_radio_light::inbox::{TryReceiveError, TrySendError};
    use myrtio_radio_light::{Frame, Inbox, Radio, Received};

    #[test]
    fn test_inbox_is_fifo() {
        let inbox: Inbox<2> = Inbox::new();
        let sender = inbox.sender();
        sender.try_send(Frame::new(b"MODE 1    0", 7)).unwrap();
        sender.try_send(Frame::new(b"MODE 2    0", 8)).unwrap();
        assert_eq!(inbox.len(), 2);

        let full = Frame::new(b"POTS 1  512", 9);
        assert_eq!(sender.try_send(full.clone()), Err(TrySendError(full)));

        assert_eq!(inbox.try_receive().unwrap().sender(), 7);
        assert_eq!(inbox.try_receive().unwrap().payload(), b"MODE 2    0");
        assert_eq!(inbox.try_receive(), Err(TryReceiveError));
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_frame_truncates_payload() {
        let frame = Frame::new(b"POTS 1    1234567890", 1);
        assert_eq!(frame.payload(), b"POTS 1    123456");
    }

    #[test]
    fn test_receiver_as_radio() {
        let inbox: Inbox<4> = Inbox::new();
        inbox.try_send(Frame::new(b"POTS 2  512", 3)).unwrap();

        let mut radio = inbox.receiver();
        let mut buf = [0u8; 16];
        assert_eq!(
            radio.try_receive(&mut buf),
            Some(Received { len: 11, sender: 3 })
        );
        assert_eq!(&buf[..11], b"POTS 2  512");
        assert_eq!(radio.try_receive(&mut buf), None);
    }
}
