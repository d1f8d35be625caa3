//! Built-in sample books for trying the pipeline without a file

/// A short book synopsis bundled with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBook {
    pub title: &'static str,
    pub text: &'static str,
}

impl SampleBook {
    /// Lowercase, dash-separated title usable on the command line
    pub fn slug(&self) -> String {
        self.title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}

pub const SAMPLE_BOOKS: &[SampleBook] = &[
    SampleBook {
        title: "Romeo and Juliet",
        text: r#"Romeo and Juliet is a tragedy written by William Shakespeare about two young star-crossed lovers whose deaths ultimately reconcile their feuding families.
Romeo Montague and Juliet Capulet fall madly in love at first sight at a Capulet party, completely ignoring the fact that their families have been bitter enemies for generations.
They're so smitten that they secretly marry the very next day with the help of Friar Lawrence, who hopes their union might end the family feud.
Romeo's best friend Mercutio gets killed defending Romeo's honor against Juliet's hot-headed cousin Tybalt, so Romeo kills Tybalt in revenge.
Now Romeo is banished from Verona, and Juliet's parents, who have no clue about the secret marriage, decide it's the perfect time to arrange her marriage to Paris, a wealthy nobleman.
Desperate to avoid bigamy and stay true to Romeo, Juliet takes a sketchy potion from Friar Lawrence that makes her appear dead for 42 hours.
The plan is for Romeo to return and whisk her away when she wakes up, but the message explaining the fake death never reaches Romeo.
Believing his wife is actually dead, Romeo buys poison and drinks it beside Juliet's tomb.
Juliet wakes up just in time to find Romeo's corpse, and in true dramatic fashion, stabs herself with his dagger rather than live without him."#,
    },
    SampleBook {
        title: "The Great Gatsby",
        text: r#"The Great Gatsby by F. Scott Fitzgerald is set in the summer of 1922 during the Jazz Age. Nick Carraway, a bond salesman from the Midwest,
moves to West Egg, Long Island, and becomes neighbors with the enigmatic millionaire Jay Gatsby. Gatsby is famous for throwing incredibly extravagant parties at his mansion every weekend,
complete with orchestras, endless champagne, and hundreds of guests who don't even know him. All of this is part of his obsessive plan to win back Daisy Buchanan, his former lover who
is now married to the wealthy but brutish Tom Buchanan and lives across the bay in the more fashionable East Egg.
Gatsby has been pining for Daisy for five years and has built his entire fortune and persona around the dream of recreating their past romance.
When Nick arranges their reunion, Gatsby and Daisy begin an affair, but their dream is shattered by reality. Tom is also cheating on Daisy with Myrtle Wilson, who lives in the
Valley of Ashes between West Egg and New York City. Everything comes crashing down when Daisy, driving Gatsby's distinctive yellow car in an emotional state, accidentally strikes and
kills Myrtle. Myrtle's distraught husband George shoots Gatsby dead in his pool, believing Gatsby was the driver. Nick, disgusted by the moral emptiness of the wealthy elite, leaves
New York, reflecting on how Gatsby's dream represents the corruption of the American Dream itself."#,
    },
    SampleBook {
        title: "Moby Dick",
        text: r#"Moby Dick by Herman Melville follows narrator Ishmael, who decides to go whaling and ends up in New Bedford where he shares a bed with Queequeg, a heavily tattooed
Polynesian harpooneer who initially terrifies him but becomes his best friend. They sign up for a whaling voyage on the Pequod, a ship commanded by the mysterious Captain Ahab,
who doesn't appear on deck for days after they set sail. When Ahab finally reveals himself, the crew discovers he's missing a leg and is completely obsessed with hunting down Moby Dick,
the legendary white sperm whale that destroyed his limb and left him with a prosthetic leg made of whalebone.
Ahab's monomaniacal quest for revenge against this one specific whale consumes him entirely, and he offers a gold doubloon to whoever spots Moby Dick first.
The crew spends months sailing across the world's oceans, hunting regular whales for oil while Ahab searches obsessively for his white nemesis. Along the way, they encounter other
ships and hear various tales about the legendary whale's supernatural strength and intelligence. When they finally find Moby Dick, the whale proves to be every bit as formidable
as the legends suggest. In an epic three-day battle, the enraged whale destroys the Pequod, drags Ahab to his death tangled in harpoon lines, and kills nearly the entire crew.
Only Ishmael survives by clinging to Queequeg's coffin, living to tell this tale of obsession, fate, and man's futile struggle against the forces of nature."#,
    },
    SampleBook {
        title: "Gravity's Rainbow",
        text: r#"Gravity's Rainbow by Thomas Pynchon is an incredibly complex and surreal novel set during World War II that follows American soldier Tyrone Slothrop,
who has a very strange and disturbing statistical correlation: everywhere he has sexual encounters in London, German V-2 rockets strike a few days later. This bizarre pattern catches
the attention of military scientists and psychologists who begin studying him like a lab rat, trying to figure out if he's psychic, cursed, or part of some larger conspiracy.
The story weaves together dozens of characters across war-torn Europe, including mad scientists, corporate executives, spies, and various other eccentric figures, all connected
by paranoid theories about technology, control, and the military-industrial complex. As the war progresses, Slothrop becomes increasingly paranoid and mentally unstable, eventually
deserting and wandering through the chaos of post-war Europe while being pursued by various shadowy organizations. The narrative becomes more and more fragmented and surreal, with
Slothrop literally disappearing from his own story as his identity dissolves completely. Meanwhile, the book explores themes of entropy, the dehumanizing effects of modern technology,
and massive corporate-government conspiracies that treat human beings as expendable resources. The novel is famous for being nearly impossible to follow, packed with scientific jargon,
historical references, drug-fueled hallucinations, and Pynchon's signature blend of high intellectual concepts with lowbrow humor, including singing lightbulbs and a sentient rocket
that achieves consciousness."#,
    },
    SampleBook {
        title: "The Odyssey",
        text: r#"The Odyssey by Homer is an epic poem that follows the Greek hero Odysseus on his absolutely chaotic ten-year journey home to Ithaca after the Trojan War ends.
What should have been a straightforward trip turns into a decade-long nightmare because Odysseus has managed to anger Poseidon, god of the sea, by blinding his son, the Cyclops Polyphemus.
Along the way, Odysseus and his crew encounter an incredible array of supernatural dangers: they get trapped by the lotus-eaters who drug people into forgetting their homes, barely escape
being eaten by the cannibalistic Cyclops, resist the deadly song of the Sirens by tying Odysseus to the mast, and navigate between the six-headed monster Scylla and the whirlpool Charybdis.
His men keep making terrible decisions, like eating the sacred cattle of the sun god, which gets them all killed. Meanwhile, back in Ithaca, Odysseus's wife Penelope is dealing with her
own crisis: dozens of arrogant suitors have moved into her palace, eating all her food, drinking her wine, and pressuring her to choose one of them as her new husband since they assume
Odysseus is dead. She cleverly delays them by weaving a funeral shroud during the day and secretly unraveling it at night, but she can't stall forever. Their son Telemachus, now grown up,
goes searching for news of his father with help from the goddess Athena. When Odysseus finally makes it home after losing all his ships and men, he disguises himself as a beggar to scope
out the situation. With Athena's help and Telemachus's support, he reveals his true identity by stringing his mighty bow and then slaughters all the suitors in an epic final battle,
reclaiming his throne and reuniting with his faithful wife."#,
    },
    SampleBook {
        title: "Dante's Inferno",
        text: r#"Dante's Inferno by Dante Alighieri follows the poet Dante as he journeys through the nine circles of Hell.
Guided by the Roman poet Virgil, Dante witnesses the punishments of the damned, each fitting their sins in life.
They descend through circles containing the unbaptized, the lustful, gluttons, the wrathful, heretics, the violent, fraudsters, and traitors.
At Hell's center, they encounter Satan frozen in ice, chewing on history's greatest traitors.
The journey serves as both a literal adventure and an allegory for the soul's recognition of sin.
The work explores themes of divine justice, redemption, and the consequences of moral choices."#,
    },
];

/// Look up a sample by title or slug, ignoring case
pub fn find_sample(name: &str) -> Option<&'static SampleBook> {
    let name = name.trim();
    SAMPLE_BOOKS
        .iter()
        .find(|book| book.title.eq_ignore_ascii_case(name) || book.slug() == name.to_lowercase())
}
